use async_trait::async_trait;
use std::fmt::Debug;

use super::point::Coordinates;

/// Reverse geocoding collaborator, used only to label a search area.
///
/// Implementations are best-effort: any failure is reported as `None`.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync + Debug {
    /// Resolve a coordinate pair to a human-readable area name
    async fn area_name(&self, point: Coordinates) -> Option<String>;
}
