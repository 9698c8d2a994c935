//! Persisted classification decisions.
//!
//! A [`ClassificationRecord`] maps every RPC name to the affordance it was
//! assigned. It is written at the end of every generation run and, when it
//! is supplied to a later run, replaces the heuristic classification so the
//! same decisions are reproduced without recomputation.
//!
//! The JSON layout is keyed by RPC name; the affordance name is omitted when
//! it equals the RPC name:
//!
//! ```json
//! {
//!   "GetColor": {"AffClass": "property", "Name": "Color"},
//!   "Compute": {"AffClass": "action"}
//! }
//! ```

use crate::{AffordanceKind, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification of one RPC.
///
/// The class is kept as written so that an invalid value surfaces as a
/// classification error naming the RPC instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationEntry {
    /// Affordance class: `property`, `action` or `event`
    #[serde(rename = "AffClass")]
    pub affordance_class: String,
    /// Affordance name, when it differs from the RPC name
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ClassificationEntry {
    /// Creates an entry, dropping the affordance name if it equals the RPC name.
    #[must_use]
    pub fn new(kind: AffordanceKind, affordance_name: &str, rpc_name: &str) -> Self {
        Self {
            affordance_class: kind.as_str().to_string(),
            name: (affordance_name != rpc_name).then(|| affordance_name.to_string()),
        }
    }

    /// Returns the affordance name for `rpc_name`.
    #[must_use]
    pub fn affordance_name<'a>(&'a self, rpc_name: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(rpc_name)
    }

    /// Parses the affordance class.
    ///
    /// # Errors
    ///
    /// Returns the raw value if it is not a known class.
    pub fn kind(&self) -> std::result::Result<AffordanceKind, String> {
        self.affordance_class.parse()
    }
}

/// Persisted `rpc name → classification` mapping.
///
/// # Examples
///
/// ```
/// use grpcwot_core::{AffordanceKind, ClassificationEntry, ClassificationRecord};
///
/// let mut record = ClassificationRecord::default();
/// record.insert("GetColor", ClassificationEntry::new(AffordanceKind::Property, "Color", "GetColor"));
///
/// let json = record.to_json_string()?;
/// let replayed = ClassificationRecord::from_json_str(&json)?;
/// assert_eq!(replayed, record);
/// # Ok::<(), grpcwot_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationRecord {
    entries: BTreeMap<String, ClassificationEntry>,
}

impl ClassificationRecord {
    /// Parses a record from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SerializationError`] if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the record to pretty-printed JSON with sorted keys.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SerializationError`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Adds or replaces the entry for an RPC.
    pub fn insert(&mut self, rpc_name: impl Into<String>, entry: ClassificationEntry) {
        self.entries.insert(rpc_name.into(), entry);
    }

    /// Returns the entry for an RPC.
    #[must_use]
    pub fn get(&self, rpc_name: &str) -> Option<&ClassificationEntry> {
        self.entries.get(rpc_name)
    }

    /// Returns `true` if the record has an entry for the RPC.
    #[must_use]
    pub fn contains(&self, rpc_name: &str) -> bool {
        self.entries.contains_key(rpc_name)
    }

    /// Iterates over `(rpc name, entry)` pairs sorted by RPC name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassificationEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the record has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ClassificationEntry)> for ClassificationRecord {
    fn from_iter<I: IntoIterator<Item = (String, ClassificationEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_omits_name_equal_to_rpc() {
        let entry = ClassificationEntry::new(AffordanceKind::Event, "Alert", "Alert");
        assert_eq!(serde_json::to_value(&entry).unwrap(), json!({"AffClass": "event"}));
        assert_eq!(entry.affordance_name("Alert"), "Alert");
    }

    #[test]
    fn test_entry_keeps_distinct_name() {
        let entry = ClassificationEntry::new(AffordanceKind::Property, "Color", "GetColor");
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"AffClass": "property", "Name": "Color"})
        );
        assert_eq!(entry.affordance_name("GetColor"), "Color");
    }

    #[test]
    fn test_parse_legacy_record() {
        let record = ClassificationRecord::from_json_str(
            r#"{"GetColor":{"AffClass":"property","Name":"Color"},"Compute":{"AffClass":"action"}}"#,
        )
        .unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("Compute").unwrap().kind(), Ok(AffordanceKind::Action));
        assert!(record.contains("GetColor"));
    }

    #[test]
    fn test_invalid_class_is_kept_verbatim() {
        let record = ClassificationRecord::from_json_str(r#"{"Ping":{"AffClass":"signal"}}"#).unwrap();
        assert_eq!(record.get("Ping").unwrap().kind(), Err("signal".to_string()));
    }

    #[test]
    fn test_written_keys_are_sorted() {
        let record: ClassificationRecord = [
            ("Zeta".to_string(), ClassificationEntry::new(AffordanceKind::Action, "Zeta", "Zeta")),
            ("Alpha".to_string(), ClassificationEntry::new(AffordanceKind::Action, "Alpha", "Alpha")),
        ]
        .into_iter()
        .collect();
        let json = record.to_json_string().unwrap();
        assert!(json.find("Alpha").unwrap() < json.find("Zeta").unwrap());
        assert_eq!(record.iter().next().unwrap().0, "Alpha");
    }
}
