use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Coordinates, ReverseGeocoder};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "doctor_locator";

/// Reverse geocoder backed by an OpenStreetMap Nominatim instance
#[derive(Debug)]
pub struct NominatimGeocoder<C: HttpClientTrait> {
    client: C,
    base_url: String,
    user_agent: String,
}

impl<C: HttpClientTrait> NominatimGeocoder<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_NOMINATIM_BASE_URL, DEFAULT_USER_AGENT)
    }

    pub fn with_base_url(
        client: C,
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
        }
    }

    fn reverse_url(&self) -> String {
        format!("{}/reverse", self.base_url)
    }
}

#[async_trait]
impl<C: HttpClientTrait> ReverseGeocoder for NominatimGeocoder<C> {
    async fn area_name(&self, point: Coordinates) -> Option<String> {
        let query = [
            ("format", "jsonv2".to_string()),
            ("lat", point.latitude.to_string()),
            ("lon", point.longitude.to_string()),
        ];

        let json = match self
            .client
            .get_json(
                &self.reverse_url(),
                vec![("User-Agent", self.user_agent.as_str())],
                &query,
            )
            .await
        {
            Ok(json) => json,
            Err(e) => {
                warn!(
                    latitude = point.latitude,
                    longitude = point.longitude,
                    error = %e,
                    "Reverse geocoding failed"
                );
                return None;
            }
        };

        let area = serde_json::from_value::<NominatimReverse>(json)
            .ok()
            .and_then(|r| r.address)
            .and_then(NominatimAddress::area_name);

        debug!(area = ?area, "Reverse geocoding resolved");
        area
    }
}

#[derive(Debug, Deserialize)]
struct NominatimReverse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    suburb: Option<String>,
    neighbourhood: Option<String>,
    city_district: Option<String>,
    city: Option<String>,
}

impl NominatimAddress {
    /// Most specific populated field: suburb, neighbourhood, city district, city
    fn area_name(self) -> Option<String> {
        [self.suburb, self.neighbourhood, self.city_district, self.city]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}
