//! Request payloads for the recommender and the attribute transfer service

use serde::Serialize;

use crate::params::ParameterSet;
use crate::slot::{RERANK_SLOT, SlotSource};
use crate::validate::SlotValidator;

/// Recommender endpoint used for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendMethod {
    RecommendService,
    TextSearch,
}

impl RecommendMethod {
    pub fn path(self) -> &'static str {
        match self {
            RecommendMethod::RecommendService => "recommend_service",
            RecommendMethod::TextSearch => "text_search",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub method: RecommendMethod,
    pub params: ParameterSet,
}

/// Recommend by life situation meters
pub fn life_situation_request<S: SlotSource + ?Sized>(
    validator: &SlotValidator<'_, S>,
) -> RecommendationRequest {
    let mut params = ParameterSet::new();
    params
        .add("limit", validator.result_limit())
        .add("rerank", validator.flag(RERANK_SLOT))
        .add("life_situation_meters", validator.life_situation_meters())
        .add("service_filters", validator.service_filters());

    RecommendationRequest {
        method: RecommendMethod::RecommendService,
        params,
    }
}

/// Recommend by free-text search
pub fn text_search_request<S: SlotSource + ?Sized>(
    validator: &SlotValidator<'_, S>,
) -> RecommendationRequest {
    let mut params = ParameterSet::new();
    params
        .add("limit", validator.result_limit())
        .add("rerank", validator.flag(RERANK_SLOT))
        .add("search_text", validator.search_text())
        .add("service_filters", validator.service_filters());

    RecommendationRequest {
        method: RecommendMethod::TextSearch,
        params,
    }
}

/// Free-text search whose results are reranked locally, so the remote
/// reranker is not requested
pub fn local_rerank_request<S: SlotSource + ?Sized>(
    validator: &SlotValidator<'_, S>,
) -> RecommendationRequest {
    let mut params = ParameterSet::new();
    params
        .add("limit", validator.result_limit())
        .add("search_text", validator.search_text())
        .add("service_filters", validator.service_filters());

    RecommendationRequest {
        method: RecommendMethod::TextSearch,
        params,
    }
}

/// Attributes handed to the next service on session transfer
pub fn session_attributes<S: SlotSource + ?Sized>(validator: &SlotValidator<'_, S>) -> ParameterSet {
    let mut attributes = ParameterSet::new();
    attributes
        .add("age", validator.age())
        .add("life_situation_meters", validator.life_situation_meters())
        .add("municipality_code", validator.municipality());
    attributes
}

/// Body for posting attributes to a target service channel
pub fn attribute_transfer(service_channel_id: Option<String>, attributes: ParameterSet) -> ParameterSet {
    let mut params = ParameterSet::new();
    params
        .add("service_channel_id", service_channel_id)
        .add("session_attributes", attributes);
    params
}
