//! Doctor entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::geo::{Coordinates, Located};

/// A registered doctor, as stored by the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2 hash - never exposed in serialization
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub specialization: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Years of experience
    pub experience: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl DoctorRecord {
    /// Create a doctor with only the fields collected at registration
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        specialization: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            specialization: specialization.into(),
            hospital_name: None,
            city: None,
            area: None,
            experience: 0,
            latitude: None,
            longitude: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_practice(
        mut self,
        hospital_name: impl Into<String>,
        city: impl Into<String>,
        area: impl Into<String>,
    ) -> Self {
        self.hospital_name = Some(hospital_name.into());
        self.city = Some(city.into());
        self.area = Some(area.into());
        self
    }

    pub fn with_experience(mut self, years: i32) -> Self {
        self.experience = years;
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Case-insensitive check against hospital name, city and area
    pub fn matches_location(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();

        [&self.hospital_name, &self.city, &self.area]
            .into_iter()
            .flatten()
            .any(|value| value.to_lowercase().contains(&needle))
    }
}

impl Located for DoctorRecord {
    fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }
}

/// The short form used by the booking form's doctor picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: i64,
    pub name: String,
    pub specialization: String,
}

impl From<&DoctorRecord> for DoctorSummary {
    fn from(doctor: &DoctorRecord) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name.clone(),
            specialization: doctor.specialization.clone(),
        }
    }
}
