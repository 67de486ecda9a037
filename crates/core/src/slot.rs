//! Raw session values and the fixed slot names the actions read and write

use serde_json::{Map, Value as JsonValue};

pub const RESULT_LIMIT_SLOT: &str = "sr_param_result_limit";
pub const SEARCH_TEXT_SLOT: &str = "sr_param_search_text";
pub const INCLUDE_NATIONAL_SERVICES_SLOT: &str = "sr_filter_include_national_services";
pub const RERANK_SLOT: &str = "sr_param_rerank";
pub const SHOW_REQUEST_PARAMETERS_SLOT: &str = "sr_show_request_parameters";

pub const ALLOW_HINT_SLOT: &str = "sr_whitelist";
pub const BLOCK_HINT_SLOT: &str = "sr_blacklist";

pub const RECOMMENDATIONS_SLOT: &str = "sr_recommended_services";
pub const BUTTON_PRESSED_SLOT: &str = "sr_button_pressed";
pub const BUTTON_PRESSED_INTENT: &str = "sr.buttonpressed";

pub const AGE_SLOT: &str = "age";
pub const MUNICIPALITY_SLOT: &str = "municipality_code";
pub const TRANSFER_TARGET_SLOT: &str = "session_transfer_target_service";
pub const ACCESS_TOKEN_SLOT: &str = "access_token";
pub const SESSION_METADATA_SLOT: &str = "session_started_metadata";

/// A session value as the dialogue engine stores it.
///
/// The store enforces no schema, so every typed read goes through the
/// coercion functions in [`crate::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SlotValue {
    #[default]
    Absent,
    Text(String),
    Integer(i64),
    Boolean(bool),
    List(Vec<String>),
}

impl SlotValue {
    /// Convert a JSON slot value.
    ///
    /// Objects have no slot interpretation and read as absent. Fractional
    /// numbers truncate toward zero. List items that are not scalars are dropped.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null | JsonValue::Object(_) => SlotValue::Absent,
            JsonValue::Bool(b) => SlotValue::Boolean(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => SlotValue::Integer(i),
                None => match n.as_f64() {
                    Some(f) if f.is_finite() => SlotValue::Integer(f.trunc() as i64),
                    _ => SlotValue::Absent,
                },
            },
            JsonValue::String(s) => SlotValue::Text(s.clone()),
            JsonValue::Array(items) => SlotValue::List(
                items
                    .iter()
                    .filter_map(|item| match item {
                        JsonValue::String(s) => Some(s.clone()),
                        JsonValue::Number(n) => Some(n.to_string()),
                        JsonValue::Bool(b) => Some(b.to_string()),
                        _ => None,
                    })
                    .collect(),
            ),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, SlotValue::Absent)
    }

    /// Short type name used in validation errors
    pub fn kind(&self) -> &'static str {
        match self {
            SlotValue::Absent => "absent",
            SlotValue::Text(_) => "string",
            SlotValue::Integer(_) => "integer",
            SlotValue::Boolean(_) => "boolean",
            SlotValue::List(_) => "list",
        }
    }
}

impl From<&str> for SlotValue {
    fn from(s: &str) -> Self {
        SlotValue::Text(s.to_string())
    }
}

impl From<i64> for SlotValue {
    fn from(i: i64) -> Self {
        SlotValue::Integer(i)
    }
}

impl From<bool> for SlotValue {
    fn from(b: bool) -> Self {
        SlotValue::Boolean(b)
    }
}

impl From<Vec<&str>> for SlotValue {
    fn from(items: Vec<&str>) -> Self {
        SlotValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Read access to one conversation's slots
pub trait SlotSource {
    fn slot(&self, name: &str) -> SlotValue;

    /// Raw JSON for slots holding structured data (stored results, metadata)
    fn raw(&self, name: &str) -> Option<&JsonValue>;
}

impl SlotSource for Map<String, JsonValue> {
    fn slot(&self, name: &str) -> SlotValue {
        self.get(name).map(SlotValue::from_json).unwrap_or_default()
    }

    fn raw(&self, name: &str) -> Option<&JsonValue> {
        self.get(name).filter(|v| !v.is_null())
    }
}
