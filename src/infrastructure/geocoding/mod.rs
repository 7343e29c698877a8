//! Reverse geocoding implementations

mod nominatim;

pub use nominatim::{NominatimGeocoder, DEFAULT_USER_AGENT};

use async_trait::async_trait;

use crate::domain::{Coordinates, ReverseGeocoder};

/// Geocoder used when geocoding is switched off in configuration
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledGeocoder;

#[async_trait]
impl ReverseGeocoder for DisabledGeocoder {
    async fn area_name(&self, _point: Coordinates) -> Option<String> {
        None
    }
}
