//! Request parameter assembly

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::meters::LifeSituationMeters;

/// A value the recommender accepts as a request parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Boolean(bool),
    Integer(i64),
    Text(String),
    List(Vec<String>),
    Meters(LifeSituationMeters),
    Object(ParameterSet),
}

impl ParamValue {
    /// Whether the assembler keeps this value.
    ///
    /// Booleans and integers are always kept (false and 0 included). Empty
    /// strings, lists and mappings are dropped.
    pub fn is_meaningful(&self) -> bool {
        match self {
            ParamValue::Boolean(_) | ParamValue::Integer(_) => true,
            ParamValue::Text(s) => !s.is_empty(),
            ParamValue::List(items) => !items.is_empty(),
            ParamValue::Meters(meters) => !meters.is_empty(),
            ParamValue::Object(params) => !params.is_empty(),
        }
    }
}

/// Conversion into an optional parameter value; `None` means "not provided"
pub trait IntoParam {
    fn into_param(self) -> Option<ParamValue>;
}

impl IntoParam for ParamValue {
    fn into_param(self) -> Option<ParamValue> {
        Some(self)
    }
}

impl IntoParam for bool {
    fn into_param(self) -> Option<ParamValue> {
        Some(ParamValue::Boolean(self))
    }
}

impl IntoParam for i64 {
    fn into_param(self) -> Option<ParamValue> {
        Some(ParamValue::Integer(self))
    }
}

impl IntoParam for String {
    fn into_param(self) -> Option<ParamValue> {
        Some(ParamValue::Text(self))
    }
}

impl IntoParam for &str {
    fn into_param(self) -> Option<ParamValue> {
        Some(ParamValue::Text(self.to_string()))
    }
}

impl IntoParam for Vec<String> {
    fn into_param(self) -> Option<ParamValue> {
        Some(ParamValue::List(self))
    }
}

impl IntoParam for LifeSituationMeters {
    fn into_param(self) -> Option<ParamValue> {
        Some(ParamValue::Meters(self))
    }
}

impl IntoParam for ParameterSet {
    fn into_param(self) -> Option<ParamValue> {
        Some(ParamValue::Object(self))
    }
}

impl<T: IntoParam> IntoParam for Option<T> {
    fn into_param(self) -> Option<ParamValue> {
        self.and_then(IntoParam::into_param)
    }
}

/// Ordered parameter mapping built fresh for each outbound request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter if it is provided and meaningful. Re-adding a name
    /// replaces the earlier value in place.
    pub fn add(&mut self, name: &str, value: impl IntoParam) -> &mut Self {
        let Some(value) = value.into_param() else {
            return self;
        };
        if !value.is_meaningful() {
            return self;
        }

        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name.to_string(), value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl Serialize for ParameterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Boolean(b) => serializer.serialize_bool(*b),
            ParamValue::Integer(i) => serializer.serialize_i64(*i),
            ParamValue::Text(s) => serializer.serialize_str(s),
            ParamValue::List(items) => items.serialize(serializer),
            ParamValue::Meters(meters) => meters.serialize(serializer),
            ParamValue::Object(params) => params.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meters::LifeSituationFeature;
    use serde_json::json;

    #[test]
    fn false_is_kept_and_absent_is_skipped() {
        let mut params = ParameterSet::new();
        params.add("rerank", false).add("include", None::<bool>);
        assert_eq!(params.get("rerank"), Some(&ParamValue::Boolean(false)));
        assert!(!params.contains("include"));
    }

    #[test]
    fn zero_is_kept() {
        let mut params = ParameterSet::new();
        params.add("limit", 0_i64);
        assert_eq!(params.get("limit"), Some(&ParamValue::Integer(0)));
    }

    #[test]
    fn empty_values_are_skipped() {
        let mut params = ParameterSet::new();
        params
            .add("search_text", "")
            .add("codes", Vec::<String>::new())
            .add("service_filters", ParameterSet::new())
            .add("life_situation_meters", LifeSituationMeters::default());
        assert!(params.is_empty());
    }

    #[test]
    fn readding_replaces_in_place() {
        let mut params = ParameterSet::new();
        params.add("a", 1_i64).add("b", 2_i64).add("a", 3_i64);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(params.get("a"), Some(&ParamValue::Integer(3)));
    }

    #[test]
    fn nested_sets_serialize_as_objects() {
        let mut meters = LifeSituationMeters::default();
        meters.insert(LifeSituationFeature::Health, 4);

        let mut filters = ParameterSet::new();
        filters
            .add("include_national_services", false)
            .add("municipality_codes", vec!["091".to_string()]);

        let mut params = ParameterSet::new();
        params
            .add("limit", 5_i64)
            .add("life_situation_meters", meters)
            .add("service_filters", filters);

        let expected = json!({
            "limit": 5,
            "life_situation_meters": {"health": [4]},
            "service_filters": {
                "include_national_services": false,
                "municipality_codes": ["091"]
            }
        });
        assert_eq!(serde_json::to_value(&params).unwrap(), expected);
    }

    #[test]
    fn serialized_text_keeps_insertion_order() {
        let mut meters = LifeSituationMeters::default();
        meters.insert(LifeSituationFeature::Health, 2);

        let mut params = ParameterSet::new();
        params
            .add("limit", 5_i64)
            .add("rerank", true)
            .add("life_situation_meters", meters);
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"limit":5,"rerank":true,"life_situation_meters":{"health":[2]}}"#
        );
    }
}
