//! Classification filters and the registry holding one per filter domain

use std::collections::BTreeMap;

use serde::Serialize;

use crate::codes::{CodeTable, CodeTables};
use crate::error::ValidationError;
use crate::slot::SlotValue;

/// Filter domains the recommender understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDomain {
    Region,
    Municipality,
    HospitalDistrict,
    ServiceClass,
    TargetGroup,
    ServiceCollection,
}

impl FilterDomain {
    /// Order in which filters are written into `service_filters`
    pub const ALL: [FilterDomain; 6] = [
        FilterDomain::Municipality,
        FilterDomain::Region,
        FilterDomain::HospitalDistrict,
        FilterDomain::ServiceClass,
        FilterDomain::TargetGroup,
        FilterDomain::ServiceCollection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterDomain::Region => "region_filter",
            FilterDomain::Municipality => "municipality_filter",
            FilterDomain::HospitalDistrict => "hospital_district_filter",
            FilterDomain::ServiceClass => "service_class_filter",
            FilterDomain::TargetGroup => "target_group_filter",
            FilterDomain::ServiceCollection => "service_collection_filter",
        }
    }

    /// Slot holding the user's raw selection
    pub fn slot_name(self) -> &'static str {
        match self {
            FilterDomain::Region => "sr_filter_region",
            FilterDomain::Municipality => "sr_filter_municipality",
            FilterDomain::HospitalDistrict => "sr_filter_hospital_district",
            FilterDomain::ServiceClass => "sr_filter_service_class",
            FilterDomain::TargetGroup => "sr_filter_target_group",
            FilterDomain::ServiceCollection => "sr_filter_service_collection",
        }
    }

    /// Key of the validated list inside the `service_filters` parameter
    pub fn request_key(self) -> &'static str {
        match self {
            FilterDomain::Region => "region_codes",
            FilterDomain::Municipality => "municipality_codes",
            FilterDomain::HospitalDistrict => "hospital_district_codes",
            FilterDomain::ServiceClass => "service_classes",
            FilterDomain::TargetGroup => "target_groups",
            FilterDomain::ServiceCollection => "service_collections",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

/// Validates a raw selection against one code table.
///
/// With `validate_against_table` off, codes pass through untouched. With
/// `prefer_table_value` on, surviving codes are replaced by their table
/// value and codes missing from the table are dropped, which only matters
/// when validation is off.
#[derive(Debug, Clone)]
pub struct ClassificationFilter {
    table: CodeTable,
    source_slot: &'static str,
    validate_against_table: bool,
    prefer_table_value: bool,
}

impl ClassificationFilter {
    pub fn new(
        table: CodeTable,
        source_slot: &'static str,
        validate_against_table: bool,
        prefer_table_value: bool,
    ) -> Self {
        Self {
            table,
            source_slot,
            validate_against_table,
            prefer_table_value,
        }
    }

    pub fn source_slot(&self) -> &'static str {
        self.source_slot
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Validate a selection, or `None` if nothing usable remains
    pub fn validate(&self, selection: &SlotValue) -> Option<Vec<String>> {
        self.try_validate(selection).ok()
    }

    pub fn try_validate(&self, selection: &SlotValue) -> Result<Vec<String>, ValidationError> {
        let codes = match selection {
            SlotValue::List(codes) => codes.clone(),
            SlotValue::Text(code) => vec![code.clone()],
            SlotValue::Absent => return Err(ValidationError::Missing),
            other => {
                return Err(ValidationError::WrongType {
                    expected: "code or list of codes",
                    found: other.kind(),
                });
            }
        };

        let checked = self.check_codes(codes);
        let selected = if self.prefer_table_value {
            self.table_values(&checked)
        } else {
            checked
        };

        if selected.is_empty() {
            Err(ValidationError::NoValidCodes)
        } else {
            Ok(selected)
        }
    }

    /// Keep only codes present in the table (filtered copy, order preserved)
    fn check_codes(&self, codes: Vec<String>) -> Vec<String> {
        if !self.validate_against_table {
            return codes;
        }
        codes
            .into_iter()
            .filter(|code| self.table.contains(code))
            .collect()
    }

    fn table_values(&self, codes: &[String]) -> Vec<String> {
        codes
            .iter()
            .filter_map(|code| self.table.get(code).map(str::to_string))
            .collect()
    }
}

/// One classification filter per domain, built once at start-up
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    filters: BTreeMap<FilterDomain, ClassificationFilter>,
}

impl FilterRegistry {
    pub fn new(tables: &CodeTables) -> Self {
        let filters = FilterDomain::ALL
            .into_iter()
            .map(|domain| {
                let (table, validate, prefer_value) = match domain {
                    FilterDomain::Region => (&tables.region, true, false),
                    FilterDomain::Municipality => (&tables.municipality, true, false),
                    FilterDomain::HospitalDistrict => (&tables.hospital_district, true, false),
                    FilterDomain::ServiceClass => (&tables.service_class, true, true),
                    FilterDomain::TargetGroup => (&tables.target_group, true, false),
                    FilterDomain::ServiceCollection => (&tables.service_collection, false, false),
                };
                let filter = ClassificationFilter::new(
                    table.clone(),
                    domain.slot_name(),
                    validate,
                    prefer_value,
                );
                (domain, filter)
            })
            .collect();

        Self { filters }
    }

    pub fn get(&self, domain: FilterDomain) -> Option<&ClassificationFilter> {
        self.filters.get(&domain)
    }

    pub fn by_name(&self, name: &str) -> Option<&ClassificationFilter> {
        FilterDomain::from_name(name).and_then(|domain| self.get(domain))
    }

    /// Filters in `service_filters` order
    pub fn iter(&self) -> impl Iterator<Item = (FilterDomain, &ClassificationFilter)> {
        FilterDomain::ALL
            .into_iter()
            .filter_map(|domain| self.get(domain).map(|f| (domain, f)))
    }
}
