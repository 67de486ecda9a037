//! Slot validation
//!
//! Each coercion function turns a raw [`SlotValue`] into a typed value or a
//! [`ValidationError`]. [`SlotValidator`] reads the session's slots, applies
//! the coercions and substitutes each field's default where a coercion fails.
//! Nothing here ever surfaces an error to the user.

use std::fmt::Display;

use crate::codes::CodeTable;
use crate::error::ValidationError;
use crate::filter::{FilterDomain, FilterRegistry};
use crate::meters::{LifeSituationFeature, LifeSituationMeters, MAX_FEATURE_VALUE, MIN_FEATURE_VALUE};
use crate::params::ParameterSet;
use crate::slot::{
    AGE_SLOT, ALLOW_HINT_SLOT, BLOCK_HINT_SLOT, INCLUDE_NATIONAL_SERVICES_SLOT, MUNICIPALITY_SLOT,
    RESULT_LIMIT_SLOT, SEARCH_TEXT_SLOT, SlotSource, SlotValue,
};

pub const DEFAULT_RESULT_LIMIT: i64 = 5;
pub const DEFAULT_AGE: i64 = 0;
pub const DEFAULT_MUNICIPALITY_CODE: &str = "297";
pub const DEFAULT_SEARCH_TEXT: &str = "palvelu";

/// Stand-in for an unset rerank hint. An empty hint would match every
/// description.
pub const UNSET_HINT: &str = "NULL";

fn wrong_type(expected: &'static str, value: &SlotValue) -> ValidationError {
    ValidationError::WrongType {
        expected,
        found: value.kind(),
    }
}

pub fn coerce_int(value: &SlotValue) -> Result<i64, ValidationError> {
    match value {
        SlotValue::Absent => Err(ValidationError::Missing),
        SlotValue::Integer(i) => Ok(*i),
        SlotValue::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| ValidationError::NotAnInteger(s.clone())),
        other => Err(wrong_type("integer", other)),
    }
}

/// `"1"` and `1` are true, any other number is false, other strings are
/// true only if they read "yes" (any case).
///
/// A native integer is read like its text form, so `1` is true and `0` is
/// false rather than unset.
pub fn coerce_bool(value: &SlotValue) -> Result<bool, ValidationError> {
    match value {
        SlotValue::Absent => Err(ValidationError::Missing),
        SlotValue::Boolean(b) => Ok(*b),
        SlotValue::Integer(i) => Ok(*i == 1),
        SlotValue::Text(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => Ok(i == 1),
                Err(_) => Ok(s.eq_ignore_ascii_case("yes")),
            }
        }
        other => Err(wrong_type("boolean", other)),
    }
}

/// Non-blank text; integers are rendered as text
pub fn coerce_text(value: &SlotValue) -> Result<String, ValidationError> {
    match value {
        SlotValue::Absent => Err(ValidationError::Missing),
        SlotValue::Text(s) if s.trim().is_empty() => Err(ValidationError::Missing),
        SlotValue::Text(s) => Ok(s.clone()),
        SlotValue::Integer(i) => Ok(i.to_string()),
        other => Err(wrong_type("text", other)),
    }
}

/// A single meter reading in `MIN_FEATURE_VALUE..=MAX_FEATURE_VALUE`
pub fn coerce_feature(value: &SlotValue) -> Result<u8, ValidationError> {
    let reading = coerce_int(value)?;
    if !(MIN_FEATURE_VALUE..=MAX_FEATURE_VALUE).contains(&reading) {
        return Err(ValidationError::OutOfRange {
            value: reading,
            min: MIN_FEATURE_VALUE,
            max: MAX_FEATURE_VALUE,
        });
    }
    u8::try_from(reading).map_err(|_| ValidationError::OutOfRange {
        value: reading,
        min: MIN_FEATURE_VALUE,
        max: MAX_FEATURE_VALUE,
    })
}

/// Resolve a municipality code or display name to a code in `table`
pub fn coerce_municipality(value: &SlotValue, table: &CodeTable) -> Result<String, ValidationError> {
    let candidate = match value {
        SlotValue::Absent => return Err(ValidationError::Missing),
        SlotValue::Text(s) => s.trim().to_string(),
        SlotValue::Integer(i) => format!("{i:03}"),
        other => return Err(wrong_type("municipality code or name", other)),
    };

    if table.contains(&candidate) {
        return Ok(candidate);
    }
    table
        .code_for_label(&candidate)
        .map(str::to_string)
        .ok_or(ValidationError::UnknownMunicipality(candidate))
}

/// Unwrap a coercion result, falling back to `default` and logging why
fn or_default<T: Display>(field: &str, result: Result<T, ValidationError>, default: T) -> T {
    match result {
        Ok(value) => value,
        Err(reason) => {
            tracing::debug!(field, %reason, %default, "Using default slot value");
            default
        }
    }
}

/// Typed view over one session's slots
pub struct SlotValidator<'a, S: SlotSource + ?Sized> {
    slots: &'a S,
    registry: &'a FilterRegistry,
}

impl<'a, S: SlotSource + ?Sized> SlotValidator<'a, S> {
    pub fn new(slots: &'a S, registry: &'a FilterRegistry) -> Self {
        Self { slots, registry }
    }

    pub fn slots(&self) -> &'a S {
        self.slots
    }

    pub fn result_limit(&self) -> i64 {
        or_default(
            RESULT_LIMIT_SLOT,
            coerce_int(&self.slots.slot(RESULT_LIMIT_SLOT)),
            DEFAULT_RESULT_LIMIT,
        )
    }

    pub fn age(&self) -> i64 {
        or_default(AGE_SLOT, coerce_int(&self.slots.slot(AGE_SLOT)), DEFAULT_AGE)
    }

    pub fn municipality(&self) -> String {
        let result = match self.registry.get(FilterDomain::Municipality) {
            Some(filter) => coerce_municipality(&self.slots.slot(MUNICIPALITY_SLOT), filter.table()),
            None => Err(ValidationError::Missing),
        };
        or_default(MUNICIPALITY_SLOT, result, DEFAULT_MUNICIPALITY_CODE.to_string())
    }

    pub fn search_text(&self) -> String {
        or_default(
            SEARCH_TEXT_SLOT,
            coerce_text(&self.slots.slot(SEARCH_TEXT_SLOT)),
            DEFAULT_SEARCH_TEXT.to_string(),
        )
    }

    /// Allow and block hints for reranking
    pub fn rerank_hints(&self) -> (String, String) {
        let allow = or_default(
            ALLOW_HINT_SLOT,
            coerce_text(&self.slots.slot(ALLOW_HINT_SLOT)),
            UNSET_HINT.to_string(),
        );
        let block = or_default(
            BLOCK_HINT_SLOT,
            coerce_text(&self.slots.slot(BLOCK_HINT_SLOT)),
            UNSET_HINT.to_string(),
        );
        (allow, block)
    }

    /// Features with a valid reading; the unconstrained vector when none is valid
    pub fn life_situation_meters(&self) -> LifeSituationMeters {
        let mut meters = LifeSituationMeters::default();
        for feature in LifeSituationFeature::ALL {
            match coerce_feature(&self.slots.slot(feature.slot_name())) {
                Ok(reading) => meters.insert(feature, reading),
                Err(reason) => {
                    tracing::trace!(feature = feature.name(), %reason, "Feature omitted");
                }
            }
        }

        if meters.is_empty() {
            LifeSituationMeters::unconstrained()
        } else {
            meters
        }
    }

    /// Boolean-ish slot; `None` when the slot is unset or unreadable
    pub fn flag(&self, slot: &str) -> Option<bool> {
        match coerce_bool(&self.slots.slot(slot)) {
            Ok(flag) => Some(flag),
            Err(ValidationError::Missing) => None,
            Err(reason) => {
                tracing::debug!(field = slot, %reason, "Ignoring unreadable flag");
                None
            }
        }
    }

    /// Validated selection for one filter domain
    pub fn filter_selection(&self, domain: FilterDomain) -> Option<Vec<String>> {
        let filter = self.registry.get(domain)?;
        match filter.try_validate(&self.slots.slot(filter.source_slot())) {
            Ok(codes) => Some(codes),
            Err(ValidationError::Missing) => None,
            Err(reason) => {
                tracing::debug!(filter = domain.name(), %reason, "Filter not applied");
                None
            }
        }
    }

    /// The `service_filters` request parameter
    pub fn service_filters(&self) -> ParameterSet {
        let mut filters = ParameterSet::new();
        filters.add(
            "include_national_services",
            self.flag(INCLUDE_NATIONAL_SERVICES_SLOT),
        );
        for (domain, _) in self.registry.iter() {
            filters.add(domain.request_key(), self.filter_selection(domain));
        }
        filters
    }
}
