//! Great-circle distance and radius filtering

use super::point::{Coordinates, QueryPoint};

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Anything that may carry a position
pub trait Located {
    /// Returns the coordinates, or None when either component is missing
    fn coordinates(&self) -> Option<Coordinates>;
}

impl Located for Coordinates {
    fn coordinates(&self) -> Option<Coordinates> {
        Some(*self)
    }
}

/// Haversine distance between two points in kilometers
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Keeps the candidates within `point.radius_km()` of the point's center.
///
/// Candidates without coordinates are always dropped. The boundary is
/// inclusive and the input order is preserved.
pub fn filter_within_radius<T: Located>(candidates: Vec<T>, point: &QueryPoint) -> Vec<T> {
    candidates
        .into_iter()
        .filter(|candidate| match candidate.coordinates() {
            Some(coords) => haversine_km(point.center(), coords) <= point.radius_km(),
            None => false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Place {
        name: &'static str,
        latitude: Option<f64>,
        longitude: Option<f64>,
    }

    impl Place {
        fn at(name: &'static str, latitude: f64, longitude: f64) -> Self {
            Self {
                name,
                latitude: Some(latitude),
                longitude: Some(longitude),
            }
        }
    }

    impl Located for Place {
        fn coordinates(&self) -> Option<Coordinates> {
            Some(Coordinates::new(self.latitude?, self.longitude?))
        }
    }

    fn names(places: &[Place]) -> Vec<&'static str> {
        places.iter().map(|p| p.name).collect()
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.5, "got {}", d);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [
            (Coordinates::new(28.6139, 77.2090), Coordinates::new(19.0760, 72.8777)),
            (Coordinates::new(-33.86, 151.21), Coordinates::new(51.5, -0.12)),
            (Coordinates::new(0.0, 179.9), Coordinates::new(0.0, -179.9)),
        ];

        for (a, b) in pairs {
            assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_same_point_is_zero() {
        let p = Coordinates::new(12.97, 77.59);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_antipodal_points_do_not_produce_nan() {
        let d = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 180.0));
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1.0);
    }

    #[test]
    fn test_filter_keeps_nearby_and_preserves_order() {
        let point = QueryPoint::new(0.0, 0.0, 200.0).unwrap();
        let candidates = vec![
            Place::at("one-degree", 0.0, 1.0),
            Place::at("far", 10.0, 10.0),
            Place::at("center", 0.0, 0.0),
            Place::at("half-degree", 0.5, 0.0),
        ];

        let result = filter_within_radius(candidates, &point);
        assert_eq!(names(&result), vec!["one-degree", "center", "half-degree"]);
    }

    #[test]
    fn test_filter_never_exceeds_radius() {
        let point = QueryPoint::new(28.6, 77.2, 7.5).unwrap();
        let candidates: Vec<Place> = (0..40)
            .map(|i| Place::at("grid", 28.6 + (i as f64) * 0.01, 77.2 - (i as f64) * 0.007))
            .collect();

        for kept in filter_within_radius(candidates, &point) {
            let coords = kept.coordinates().unwrap();
            assert!(haversine_km(point.center(), coords) <= point.radius_km());
        }
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let target = Coordinates::new(0.0, 1.0);
        let exact = haversine_km(Coordinates::new(0.0, 0.0), target);
        let point = QueryPoint::new(0.0, 0.0, exact).unwrap();

        let result = filter_within_radius(vec![Place::at("edge", 0.0, 1.0)], &point);
        assert_eq!(names(&result), vec!["edge"]);
    }

    #[test]
    fn test_missing_coordinates_are_excluded() {
        let point = QueryPoint::new(0.0, 0.0, 20_000.0).unwrap();
        let candidates = vec![
            Place {
                name: "no-lat",
                latitude: None,
                longitude: Some(0.0),
            },
            Place {
                name: "no-lng",
                latitude: Some(0.0),
                longitude: None,
            },
            Place {
                name: "nothing",
                latitude: None,
                longitude: None,
            },
        ];

        assert!(filter_within_radius(candidates, &point).is_empty());
    }

    #[test]
    fn test_zero_radius_keeps_exact_matches_only() {
        let point = QueryPoint::new(10.0, 20.0, 0.0).unwrap();
        let candidates = vec![Place::at("same", 10.0, 20.0), Place::at("close", 10.0001, 20.0)];

        let result = filter_within_radius(candidates, &point);
        assert_eq!(names(&result), vec!["same"]);
    }

    #[test]
    fn test_empty_candidates() {
        let point = QueryPoint::with_default_radius(0.0, 0.0).unwrap();
        let result: Vec<Place> = filter_within_radius(Vec::new(), &point);
        assert!(result.is_empty());
    }
}
