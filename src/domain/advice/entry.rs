//! Stored answers and their provenance

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a stored key is compared with an incoming query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// The stored key must equal the query
    Exact,
    /// Either string contains the other, ignoring case
    Contains,
}

impl MatchPolicy {
    pub fn matches(&self, stored_key: &str, query: &str) -> bool {
        match self {
            Self::Exact => stored_key == query,
            Self::Contains => {
                let stored = stored_key.to_lowercase();
                let query = query.to_lowercase();

                query.contains(&stored) || stored.contains(&query)
            }
        }
    }
}

/// A persisted key/answer pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceEntry {
    pub id: i64,
    pub key: String,
    pub answer: String,
    /// Patient who asked, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asked_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl AdviceEntry {
    pub fn new(key: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: 0,
            key: key.into(),
            answer: answer.into(),
            asked_by: None,
            created_at: Utc::now(),
        }
    }

    pub fn asked_by(mut self, patient_id: Option<i64>) -> Self {
        self.asked_by = patient_id;
        self
    }
}

/// Where an answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Stored,
    Generated,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Generated => "generated",
        }
    }
}

/// An answer plus its provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub answer: String,
    pub source: Provenance,
}

impl Advice {
    pub fn stored(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            source: Provenance::Stored,
        }
    }

    pub fn generated(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            source: Provenance::Generated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_policy() {
        assert!(MatchPolicy::Exact.matches("fever", "fever"));
        assert!(!MatchPolicy::Exact.matches("fever", "mild fever and chills"));
        assert!(!MatchPolicy::Exact.matches("Fever", "fever"));
    }

    #[test]
    fn test_contains_policy_stored_inside_query() {
        assert!(MatchPolicy::Contains.matches("fever", "mild fever and chills"));
    }

    #[test]
    fn test_contains_policy_query_inside_stored() {
        assert!(MatchPolicy::Contains.matches("persistent dry cough", "cough"));
    }

    #[test]
    fn test_contains_policy_ignores_case() {
        assert!(MatchPolicy::Contains.matches("Headache", "bad HEADACHE today"));
        assert!(!MatchPolicy::Contains.matches("headache", "back pain"));
    }

    #[test]
    fn test_provenance_serialization() {
        let advice = Advice::generated("Drink water");
        let json = serde_json::to_value(&advice).unwrap();
        assert_eq!(json["source"], "generated");
        assert_eq!(Provenance::Stored.as_str(), "stored");
    }
}
