//! Life situation feature vector (the "3x10d" meters)

use std::collections::BTreeMap;

use serde::Serialize;

/// Recommender accepts integer meter readings in this range
pub const MIN_FEATURE_VALUE: i64 = 0;
pub const MAX_FEATURE_VALUE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeSituationFeature {
    Family,
    Finance,
    Friends,
    Health,
    Housing,
    ImprovementOfStrengths,
    LifeSatisfaction,
    Resilience,
    SelfEsteem,
    WorkingStudying,
}

impl LifeSituationFeature {
    pub const ALL: [LifeSituationFeature; 10] = [
        LifeSituationFeature::Family,
        LifeSituationFeature::Finance,
        LifeSituationFeature::Friends,
        LifeSituationFeature::Health,
        LifeSituationFeature::Housing,
        LifeSituationFeature::ImprovementOfStrengths,
        LifeSituationFeature::LifeSatisfaction,
        LifeSituationFeature::Resilience,
        LifeSituationFeature::SelfEsteem,
        LifeSituationFeature::WorkingStudying,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LifeSituationFeature::Family => "family",
            LifeSituationFeature::Finance => "finance",
            LifeSituationFeature::Friends => "friends",
            LifeSituationFeature::Health => "health",
            LifeSituationFeature::Housing => "housing",
            LifeSituationFeature::ImprovementOfStrengths => "improvement_of_strengths",
            LifeSituationFeature::LifeSatisfaction => "life_satisfaction",
            LifeSituationFeature::Resilience => "resilience",
            LifeSituationFeature::SelfEsteem => "self_esteem",
            LifeSituationFeature::WorkingStudying => "working_studying",
        }
    }

    pub fn slot_name(self) -> &'static str {
        match self {
            LifeSituationFeature::Family => "3x10d_family",
            LifeSituationFeature::Finance => "3x10d_finance",
            LifeSituationFeature::Friends => "3x10d_friends",
            LifeSituationFeature::Health => "3x10d_health",
            LifeSituationFeature::Housing => "3x10d_housing",
            LifeSituationFeature::ImprovementOfStrengths => "3x10d_improvement_of_strengths",
            LifeSituationFeature::LifeSatisfaction => "3x10d_life_satisfaction",
            LifeSituationFeature::Resilience => "3x10d_resilience",
            LifeSituationFeature::SelfEsteem => "3x10d_self_esteem",
            LifeSituationFeature::WorkingStudying => "3x10d_working_studying",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Feature name → single-element reading list.
///
/// An empty list for a feature means "no constraint"; the canonical
/// all-empty vector carries every feature with an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LifeSituationMeters(BTreeMap<LifeSituationFeature, Vec<u8>>);

impl LifeSituationMeters {
    /// All ten features mapped to empty lists
    pub fn unconstrained() -> Self {
        Self(
            LifeSituationFeature::ALL
                .into_iter()
                .map(|feature| (feature, Vec::new()))
                .collect(),
        )
    }

    pub fn insert(&mut self, feature: LifeSituationFeature, value: u8) {
        self.0.insert(feature, vec![value]);
    }

    pub fn get(&self, feature: LifeSituationFeature) -> Option<&[u8]> {
        self.0.get(&feature).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LifeSituationFeature, &[u8])> {
        self.0.iter().map(|(f, v)| (*f, v.as_slice()))
    }
}
