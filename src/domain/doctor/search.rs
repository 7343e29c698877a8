//! Attribute filters for doctor search

use super::entity::DoctorRecord;

/// Attribute filters applied by the repository before any radius filtering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorSearchFilter {
    /// Substring of the specialization
    pub specialization: Option<String>,
    /// Substring of hospital name, city or area
    pub location: Option<String>,
    /// Minimum years of experience
    pub min_experience: Option<i32>,
}

impl DoctorSearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = non_blank(specialization.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_blank(location.into());
        self
    }

    pub fn with_min_experience(mut self, years: i32) -> Self {
        self.min_experience = Some(years);
        self
    }

    /// In-process evaluation, used by the in-memory repository
    pub fn matches(&self, doctor: &DoctorRecord) -> bool {
        if let Some(ref specialization) = self.specialization {
            if !doctor
                .specialization
                .to_lowercase()
                .contains(&specialization.to_lowercase())
            {
                return false;
            }
        }

        if let Some(ref location) = self.location {
            if !doctor.matches_location(location) {
                return false;
            }
        }

        if let Some(years) = self.min_experience {
            if doctor.experience < years {
                return false;
            }
        }

        true
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor(specialization: &str, experience: i32) -> DoctorRecord {
        DoctorRecord::new("Dr. Test", "t@example.com", "hash", specialization)
            .with_practice("Sunrise Clinic", "Delhi", "Saket")
            .with_experience(experience)
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(DoctorSearchFilter::new().matches(&doctor("Dermatology", 1)));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let filter = DoctorSearchFilter::new()
            .with_specialization("  ")
            .with_location("");

        assert_eq!(filter, DoctorSearchFilter::default());
    }

    #[test]
    fn test_combined_filters() {
        let filter = DoctorSearchFilter::new()
            .with_specialization("derma")
            .with_location("saket")
            .with_min_experience(5);

        assert!(filter.matches(&doctor("Dermatology", 5)));
        assert!(!filter.matches(&doctor("Dermatology", 4)));
        assert!(!filter.matches(&doctor("Cardiology", 10)));
    }
}
