//! Guaranteed top-level fields of a student document and their defaults.
//!
//! Student documents written before the tracking substructures existed lack
//! some of these keys. Presence is decided per key: a key holding JSON `null`
//! counts as absent, while an empty string, empty object or empty array is
//! present and left alone. Nested sub-fields are not inspected.

use std::fmt;

use serde_json::{Map, Value, json};

use crate::enums::AdministrativeSituation;

/// A top-level key every student document must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GuaranteedField {
    TechnicalTracking,
    TransversalTracking,
    Phone,
    AdministrativeSituation,
}

impl GuaranteedField {
    pub const ALL: [Self; 4] = [
        Self::TechnicalTracking,
        Self::TransversalTracking,
        Self::Phone,
        Self::AdministrativeSituation,
    ];

    /// Key used in the stored document.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TechnicalTracking => "technicalTracking",
            Self::TransversalTracking => "transversalTracking",
            Self::Phone => "phone",
            Self::AdministrativeSituation => "administrativeSituation",
        }
    }

    /// Typed default written when the key is missing.
    #[must_use]
    pub fn default_value(self) -> Value {
        match self {
            Self::TechnicalTracking => json!({
                "teacherNotes": [],
                "teams": [],
                "completedPildoras": [],
                "competences": [],
                "completedModules": [],
            }),
            Self::TransversalTracking => json!({
                "employabilitySessions": [],
                "individualSessions": [],
                "incidents": [],
            }),
            Self::Phone => Value::String(String::new()),
            Self::AdministrativeSituation => {
                Value::String(AdministrativeSituation::default().as_str().to_string())
            }
        }
    }

    #[must_use]
    pub fn is_present_in(self, document: &Map<String, Value>) -> bool {
        document.get(self.key()).is_some_and(|value| !value.is_null())
    }
}

impl fmt::Display for GuaranteedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Guaranteed fields absent from `document`, in declaration order.
#[must_use]
pub fn missing_fields(document: &Map<String, Value>) -> Vec<GuaranteedField> {
    GuaranteedField::ALL
        .into_iter()
        .filter(|field| !field.is_present_in(document))
        .collect()
}

/// Insert defaults for every missing guaranteed field.
///
/// Returns the fields that were added. Existing keys are never touched, so a
/// second call on the same document returns an empty list.
pub fn fill_missing_fields(document: &mut Map<String, Value>) -> Vec<GuaranteedField> {
    let missing = missing_fields(document);
    for field in &missing {
        document.insert(field.key().to_string(), field.default_value());
    }
    missing
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::{TechnicalTracking, TransversalTracking};

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn defaults_match_typed_shapes() {
        assert_eq!(
            GuaranteedField::TechnicalTracking.default_value(),
            serde_json::to_value(TechnicalTracking::default()).unwrap()
        );
        assert_eq!(
            GuaranteedField::TransversalTracking.default_value(),
            serde_json::to_value(TransversalTracking::default()).unwrap()
        );
        assert_eq!(
            GuaranteedField::AdministrativeSituation.default_value(),
            serde_json::to_value(AdministrativeSituation::default()).unwrap()
        );
    }

    #[test]
    fn legacy_document_misses_all_four() {
        let doc = object(json!({ "name": "Ada", "email": "ada@example.com" }));
        assert_eq!(missing_fields(&doc), GuaranteedField::ALL.to_vec());
    }

    #[test]
    fn null_counts_as_missing() {
        let doc = object(json!({
            "technicalTracking": null,
            "transversalTracking": {},
            "phone": "",
            "administrativeSituation": "regular",
        }));
        assert_eq!(missing_fields(&doc), vec![GuaranteedField::TechnicalTracking]);
    }

    #[test]
    fn empty_but_present_values_are_kept() {
        let mut doc = object(json!({
            "technicalTracking": {},
            "transversalTracking": { "incidents": [] },
            "phone": "",
            "administrativeSituation": "",
        }));
        let before = doc.clone();
        assert!(fill_missing_fields(&mut doc).is_empty());
        assert_eq!(doc, before);
    }

    #[test]
    fn fill_adds_only_missing_keys_and_is_idempotent() {
        let mut doc = object(json!({
            "name": "Grace",
            "phone": "+34 600 000 000",
            "technicalTracking": { "competences": ["sql"] },
        }));

        let added = fill_missing_fields(&mut doc);
        assert_eq!(
            added,
            vec![
                GuaranteedField::TransversalTracking,
                GuaranteedField::AdministrativeSituation,
            ]
        );
        assert_eq!(doc["phone"], json!("+34 600 000 000"));
        assert_eq!(doc["technicalTracking"], json!({ "competences": ["sql"] }));
        assert_eq!(doc["administrativeSituation"], json!("pending"));
        assert_eq!(doc["transversalTracking"]["incidents"], json!([]));

        assert!(fill_missing_fields(&mut doc).is_empty());
    }
}
