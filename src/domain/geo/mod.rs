//! Geolocation domain: coordinates, haversine distance and radius filtering

mod geocoder;
mod point;
mod radius;

pub use geocoder::ReverseGeocoder;
pub use point::{Coordinates, QueryPoint, DEFAULT_RADIUS_KM};
pub use radius::{filter_within_radius, haversine_km, Located, EARTH_RADIUS_KM};

#[cfg(test)]
pub use geocoder::mock::MockReverseGeocoder;
