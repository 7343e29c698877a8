//! Doctor listing and search endpoints

use axum::extract::State;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::types::{empty_as_none, ApiError, Json, Query};
use crate::domain::{DoctorSearchFilter, DoctorSummary, QueryPoint};
use crate::infrastructure::doctor::DoctorSearch;

#[derive(Debug, Default, Deserialize)]
pub struct SpecializationQuery {
    #[serde(default)]
    pub specialization: Option<String>,
}

/// GET /doctors/by-specialization
pub async fn doctors_by_specialization(
    State(state): State<AppState>,
    Query(query): Query<SpecializationQuery>,
) -> Result<Json<Vec<DoctorSummary>>, ApiError> {
    let doctors = state
        .appointments
        .doctors_by_specialization(query.specialization.as_deref())
        .await?;

    Ok(Json(doctors))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Minimum years of experience
    #[serde(default, deserialize_with = "empty_as_none")]
    pub experience: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub lng: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub radius: Option<f64>,
}

impl SearchQuery {
    fn filter(&self) -> DoctorSearchFilter {
        let mut filter = DoctorSearchFilter::new();
        if let Some(ref specialization) = self.specialization {
            filter = filter.with_specialization(specialization.as_str());
        }
        if let Some(ref location) = self.location {
            filter = filter.with_location(location.as_str());
        }
        if let Some(years) = self.experience {
            filter = filter.with_min_experience(years);
        }
        filter
    }

    /// A point only when both coordinates are present
    fn point(&self, default_radius_km: f64) -> Result<Option<QueryPoint>, ApiError> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => {
                let radius = self.radius.unwrap_or(default_radius_km);
                QueryPoint::new(lat, lng, radius)
                    .map(Some)
                    .map_err(ApiError::from)
            }
            _ => Ok(None),
        }
    }
}

/// GET /doctors
pub async fn search_doctors(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<DoctorSearch>, ApiError> {
    let point = query.point(state.default_radius_km)?;
    let result = state.doctor_search.search(&query.filter(), point).await?;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_requires_both_coordinates() {
        let only_lat = SearchQuery {
            lat: Some(18.5),
            ..Default::default()
        };
        assert!(only_lat.point(5.0).unwrap().is_none());

        let both = SearchQuery {
            lat: Some(18.5),
            lng: Some(73.8),
            ..Default::default()
        };
        let point = both.point(5.0).unwrap().unwrap();
        assert_eq!(point.radius_km(), 5.0);
    }

    #[test]
    fn test_negative_radius_is_rejected() {
        let query = SearchQuery {
            lat: Some(18.5),
            lng: Some(73.8),
            radius: Some(-1.0),
            ..Default::default()
        };
        assert!(query.point(5.0).is_err());
    }

    #[test]
    fn test_filter_ignores_blank_values() {
        let query = SearchQuery {
            specialization: Some("  ".to_string()),
            location: Some("Pune".to_string()),
            experience: Some(3),
            ..Default::default()
        };
        let filter = query.filter();

        assert!(filter.specialization.is_none());
        assert_eq!(filter.location.as_deref(), Some("Pune"));
        assert_eq!(filter.min_experience, Some(3));
    }
}
