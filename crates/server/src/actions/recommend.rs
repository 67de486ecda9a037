//! Recommendation actions

use serde_json::{Map, Value as JsonValue};
use servicerec_core::output::{API_ERROR_MESSAGE, emit_results};
use servicerec_core::request::{life_situation_request, local_rerank_request, text_search_request};
use servicerec_core::rerank::rerank;
use servicerec_core::slot::{RECOMMENDATIONS_SLOT, SHOW_REQUEST_PARAMETERS_SLOT};
use servicerec_core::{Layout, OutputSink, SlotValidator};

use super::{CollectingDispatcher, Event};
use crate::AppState;

/// Which query the action sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    LifeSituation,
    TextSearch,
    /// Text search reordered locally with the allow/block hints
    Reranked,
}

pub async fn run(
    state: &AppState,
    slots: &Map<String, JsonValue>,
    dispatcher: &mut CollectingDispatcher,
    query: Query,
    layout: Layout,
) -> Vec<Event> {
    let validator = SlotValidator::new(slots, &state.registry);

    let request = match query {
        Query::LifeSituation => life_situation_request(&validator),
        Query::TextSearch => text_search_request(&validator),
        Query::Reranked => local_rerank_request(&validator),
    };
    let hints = (query == Query::Reranked).then(|| validator.rerank_hints());

    if validator.flag(SHOW_REQUEST_PARAMETERS_SLOT).unwrap_or(false) {
        let params = serde_json::to_string(&request.params).unwrap_or_default();
        dispatcher.text(&format!("hakuparametrit: {params}"));
        if let Some((allow, block)) = &hints {
            dispatcher.text(&format!(
                "tulosten sorttausparametrit: whitelist: {allow}, blacklist: {block}"
            ));
        }
    }

    tracing::info!(
        method = request.method.path(),
        parameters = request.params.len(),
        "Requesting recommendations"
    );

    match state.recommender.recommend(&request).await {
        Ok(results) => {
            let results = match &hints {
                Some((allow, block)) => rerank(&results, allow, block),
                None => results,
            };
            emit_results(dispatcher, &results, layout);
            let stored = serde_json::to_value(&results).unwrap_or_default();
            vec![Event::slot(RECOMMENDATIONS_SLOT, stored)]
        }
        Err(e) => {
            tracing::warn!(error = %e, method = request.method.path(), "Recommendation request failed");
            metrics::counter!("collaborator_failures_total", "service" => "recommender").increment(1);
            dispatcher.text(API_ERROR_MESSAGE);
            vec![Event::slot(RECOMMENDATIONS_SLOT, JsonValue::Null)]
        }
    }
}
