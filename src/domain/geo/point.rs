//! Coordinates and search points

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Radius used when a search does not specify one
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Like `new`, but rejects values outside the valid degree ranges
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::invalid_input(format!(
                "Latitude must be between -90 and 90, got {}",
                latitude
            )));
        }

        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::invalid_input(format!(
                "Longitude must be between -180 and 180, got {}",
                longitude
            )));
        }

        Ok(Self::new(latitude, longitude))
    }
}

/// Center of a radius search plus the radius in kilometers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueryPoint {
    center: Coordinates,
    radius_km: f64,
}

impl QueryPoint {
    /// Create a query point, rejecting non-finite coordinates and negative radii
    pub fn new(latitude: f64, longitude: f64, radius_km: f64) -> Result<Self, DomainError> {
        let center = Coordinates::validated(latitude, longitude)?;

        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(DomainError::invalid_input(format!(
                "Radius must be a non-negative number of kilometers, got {}",
                radius_km
            )));
        }

        Ok(Self {
            center,
            radius_km,
        })
    }

    /// Create a query point with the default 5 km radius
    pub fn with_default_radius(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        Self::new(latitude, longitude, DEFAULT_RADIUS_KM)
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn latitude(&self) -> f64 {
        self.center.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.center.longitude
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }
}
