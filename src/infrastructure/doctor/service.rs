//! Doctor search service
//!
//! Attribute filters run in the repository. When a query point is given the
//! result is narrowed to the radius and the point is reverse geocoded.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::domain::geo::filter_within_radius;
use crate::domain::{
    DoctorRecord, DoctorRepository, DoctorSearchFilter, DomainError, QueryPoint, ReverseGeocoder,
};

/// Result of a doctor search
#[derive(Debug, Clone, Serialize)]
pub struct DoctorSearch {
    pub doctors: Vec<DoctorRecord>,
    /// Area name of the query point, when one was given and could be resolved
    pub area_name: Option<String>,
    /// Distinct non-empty areas across all doctors, sorted
    pub areas: Vec<String>,
}

#[derive(Debug)]
pub struct DoctorSearchService {
    repository: Arc<dyn DoctorRepository>,
    geocoder: Arc<dyn ReverseGeocoder>,
}

impl DoctorSearchService {
    pub fn new(repository: Arc<dyn DoctorRepository>, geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self {
            repository,
            geocoder,
        }
    }

    pub async fn search(
        &self,
        filter: &DoctorSearchFilter,
        point: Option<QueryPoint>,
    ) -> Result<DoctorSearch, DomainError> {
        let mut doctors = self.repository.search(filter).await?;
        let mut area_name = None;

        if let Some(point) = point {
            let before = doctors.len();
            doctors = filter_within_radius(doctors, &point);
            debug!(
                before,
                after = doctors.len(),
                radius_km = point.radius_km(),
                "Applied radius filter"
            );

            area_name = self.geocoder.area_name(point.center()).await;
        }

        let areas = self.repository.areas().await?;

        Ok(DoctorSearch {
            doctors,
            area_name,
            areas,
        })
    }

    /// Whether the doctor directory's storage is reachable
    pub async fn health_check(&self) -> Result<bool, DomainError> {
        self.repository.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::MockReverseGeocoder;
    use crate::infrastructure::doctor::InMemoryDoctorRepository;

    async fn repository() -> Arc<InMemoryDoctorRepository> {
        let repo = InMemoryDoctorRepository::with_doctors(vec![
            // Pune city centre
            DoctorRecord::new("Near", "near@clinic.test", "h", "Cardiology")
                .with_practice("Ruby Hall", "Pune", "Camp")
                .with_location(18.5204, 73.8567),
            // Mumbai, ~120 km away
            DoctorRecord::new("Far", "far@clinic.test", "h", "Cardiology")
                .with_practice("Lilavati", "Mumbai", "Bandra")
                .with_location(19.0760, 72.8777),
            DoctorRecord::new("Nowhere", "nowhere@clinic.test", "h", "Cardiology"),
        ])
        .await
        .unwrap();
        Arc::new(repo)
    }

    #[tokio::test]
    async fn test_search_without_point_skips_radius_and_geocoding() {
        let geocoder = Arc::new(MockReverseGeocoder::new().with_area("Shivajinagar"));
        let service = DoctorSearchService::new(repository().await, geocoder.clone());

        let result = service.search(&DoctorSearchFilter::new(), None).await.unwrap();

        assert_eq!(result.doctors.len(), 3);
        assert_eq!(result.area_name, None);
        assert_eq!(geocoder.calls(), 0);
        assert_eq!(result.areas, vec!["Bandra", "Camp"]);
    }

    #[tokio::test]
    async fn test_search_with_point_filters_by_radius() {
        let geocoder = Arc::new(MockReverseGeocoder::new().with_area("Shivajinagar"));
        let service = DoctorSearchService::new(repository().await, geocoder.clone());

        let point = QueryPoint::new(18.5300, 73.8470, 5.0).unwrap();
        let result = service
            .search(&DoctorSearchFilter::new(), Some(point))
            .await
            .unwrap();

        let names: Vec<_> = result.doctors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Near"]);
        assert_eq!(result.area_name.as_deref(), Some("Shivajinagar"));
        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test]
    async fn test_geocoder_without_answer_yields_none() {
        let service = DoctorSearchService::new(
            repository().await,
            Arc::new(MockReverseGeocoder::new()),
        );

        let point = QueryPoint::with_default_radius(18.5204, 73.8567).unwrap();
        let result = service
            .search(&DoctorSearchFilter::new(), Some(point))
            .await
            .unwrap();

        assert_eq!(result.doctors.len(), 1);
        assert!(result.area_name.is_none());
    }

    #[tokio::test]
    async fn test_attribute_filters_combine_with_radius() {
        let service = DoctorSearchService::new(
            repository().await,
            Arc::new(MockReverseGeocoder::new()),
        );

        let filter = DoctorSearchFilter::new().with_location("mumbai");
        let point = QueryPoint::new(18.5204, 73.8567, 500.0).unwrap();
        let result = service.search(&filter, Some(point)).await.unwrap();

        assert_eq!(result.doctors.len(), 1);
        assert_eq!(result.doctors[0].name, "Far");
    }
}
