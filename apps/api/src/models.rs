//! Shared screening data model.
//!
//! `FeatureResults` is a strongly-typed record with one optional slot per
//! feature. The per-run result set is replaced wholesale on every screening
//! run, never merged.

use serde::{Deserialize, Serialize};

/// The five independent feature flags a caller can select for a run.
/// Each gates both computation and display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggles {
    #[serde(default)]
    pub summary: bool,
    #[serde(default)]
    pub phone: bool,
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub links: bool,
    #[serde(default)]
    pub wordcloud: bool,
}

impl Toggles {
    /// True when any contact-derived feature is selected (phone, email, links
    /// all come from one extraction pass).
    pub fn wants_contacts(&self) -> bool {
        self.phone || self.email || self.links
    }
}

/// Contact candidates pulled from the resume text. Best-effort pattern
/// matching: false positives (e.g. a decimal misread as a phone number)
/// are accepted, not errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub phone: Vec<String>,
    pub email: Vec<String>,
    pub links: Vec<String>,
}

/// Identifies one feature in reports and failure notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Summary,
    Phone,
    Email,
    Links,
    Wordcloud,
}

/// A feature that failed during a run. The run itself still completes:
/// one failing feature never blanks the others.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureFailure {
    pub feature: Feature,
    pub message: String,
}

/// Results of the last screening run. One `Option` per feature; `None`
/// means the feature was not selected for that run, or failed (see
/// `failures`).
#[derive(Debug, Clone, Default)]
pub struct FeatureResults {
    pub summary: Option<String>,
    pub phone_numbers: Option<Vec<String>>,
    pub emails: Option<Vec<String>>,
    pub links: Option<Vec<String>>,
    pub wordcloud_png: Option<Vec<u8>>,
    pub failures: Vec<FeatureFailure>,
}

impl FeatureResults {
    /// The features that actually produced a value in this run.
    pub fn computed(&self) -> Vec<Feature> {
        let mut features = Vec::new();
        if self.summary.is_some() {
            features.push(Feature::Summary);
        }
        if self.phone_numbers.is_some() {
            features.push(Feature::Phone);
        }
        if self.emails.is_some() {
            features.push(Feature::Email);
        }
        if self.links.is_some() {
            features.push(Feature::Links);
        }
        if self.wordcloud_png.is_some() {
            features.push(Feature::Wordcloud);
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles_default_all_off() {
        let toggles = Toggles::default();
        assert!(!toggles.summary);
        assert!(!toggles.wants_contacts());
        assert!(!toggles.wordcloud);
    }

    #[test]
    fn test_toggles_deserialize_missing_fields_default_false() {
        let toggles: Toggles = serde_json::from_str(r#"{"summary": true}"#).unwrap();
        assert!(toggles.summary);
        assert!(!toggles.phone);
        assert!(!toggles.wordcloud);
    }

    #[test]
    fn test_wants_contacts_any_of_three() {
        let toggles: Toggles = serde_json::from_str(r#"{"links": true}"#).unwrap();
        assert!(toggles.wants_contacts());
    }

    #[test]
    fn test_computed_lists_populated_slots_only() {
        let results = FeatureResults {
            summary: Some("short".into()),
            emails: Some(vec!["a@b.co".into()]),
            ..Default::default()
        };
        assert_eq!(results.computed(), vec![Feature::Summary, Feature::Email]);
    }

    #[test]
    fn test_feature_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Feature::Wordcloud).unwrap(),
            r#""wordcloud""#
        );
    }
}
