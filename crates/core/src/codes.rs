//! Classification code tables
//!
//! Each table maps a stable classification code to the value shown to users
//! (or, for service classes, the value the recommender expects). Tables are
//! loaded once at start-up and shared read-only afterwards.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::CodeTableError;

const BUNDLED_TABLES: &str = include_str!("../data/code_tables.json");

/// Immutable code → value mapping. Cloning shares the underlying map.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "BTreeMap<String, String>")]
pub struct CodeTable {
    entries: Arc<BTreeMap<String, String>>,
}

impl From<BTreeMap<String, String>> for CodeTable {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<BTreeMap<_, _>>()
            .into()
    }
}

impl CodeTable {
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Reverse lookup: find the code whose value equals `label`, ignoring
    /// case and surrounding whitespace.
    pub fn code_for_label(&self, label: &str) -> Option<&str> {
        let wanted = label.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(_, value)| value.to_lowercase() == wanted)
            .map(|(code, _)| code.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The six classification tables the filters validate against
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CodeTables {
    pub region: CodeTable,
    pub municipality: CodeTable,
    pub hospital_district: CodeTable,
    pub service_class: CodeTable,
    pub target_group: CodeTable,
    pub service_collection: CodeTable,
}

impl CodeTables {
    /// Tables shipped with the crate.
    ///
    /// These are a sample: the municipality table lists only a few larger
    /// municipalities, so codes and names outside it are rejected by the
    /// filters and the municipality field falls back to its default.
    /// Deployments load the complete tables with [`CodeTables::from_json_file`].
    pub fn bundled() -> Result<Self, CodeTableError> {
        Self::from_json_str(BUNDLED_TABLES)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CodeTableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tables from a JSON file with one object per domain
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CodeTableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CodeTableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tables = Self::from_json_str(&json)?;

        tracing::info!(
            path = %path.display(),
            municipalities = tables.municipality.len(),
            service_classes = tables.service_class.len(),
            "Loaded classification code tables"
        );

        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_tables_parse() {
        let tables = CodeTables::bundled().unwrap();
        assert_eq!(tables.municipality.get("091"), Some("Helsinki"));
        assert!(tables.service_class.contains("P23"));
        assert!(tables.service_collection.is_empty());
    }

    #[test]
    fn reverse_lookup_ignores_case() {
        let table: CodeTable = [("297", "Kuopio"), ("837", "Tampere")].into_iter().collect();
        assert_eq!(table.code_for_label("kuopio"), Some("297"));
        assert_eq!(table.code_for_label(" TAMPERE "), Some("837"));
        assert_eq!(table.code_for_label("Oulu"), None);
    }

    #[test]
    fn missing_domains_default_to_empty() {
        let tables = CodeTables::from_json_str(r#"{"region": {"01": "Uusimaa"}}"#).unwrap();
        assert_eq!(tables.region.len(), 1);
        assert!(tables.municipality.is_empty());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            CodeTables::from_json_str("[1, 2]"),
            Err(CodeTableError::Parse(_))
        ));
    }
}
