//! Session transfer between bots
//!
//! Before a transfer the user's attributes are posted to the attribute
//! transfer API, which hands back an access token. The receiving bot reads
//! the token from its session metadata and fetches the same attributes.

use serde_json::{Map, Value as JsonValue};
use servicerec_core::output::API_ERROR_MESSAGE;
use servicerec_core::request::{attribute_transfer, session_attributes};
use servicerec_core::slot::{
    ACCESS_TOKEN_SLOT, AGE_SLOT, MUNICIPALITY_SLOT, SESSION_METADATA_SLOT, TRANSFER_TARGET_SLOT,
};
use servicerec_core::transfer::{extract_access_token, transfer_link};
use servicerec_core::validate::coerce_text;
use servicerec_core::{LifeSituationFeature, OutputSink, SlotSource, SlotValidator};

use super::{CollectingDispatcher, Event};
use crate::AppState;
use crate::clients::SessionAttributes;

/// Session metadata key holding the token handed over by the previous bot
const METADATA_TOKEN_KEY: &str = "auroraaiAccessToken";

fn as_slot_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Slot events restoring fetched attributes
fn attribute_events(attributes: &SessionAttributes) -> Vec<Event> {
    let mut events = Vec::new();

    for (name, readings) in attributes.life_situation_meters.iter().flatten() {
        let Some(feature) = LifeSituationFeature::from_name(name) else {
            tracing::debug!(feature = %name, "Ignoring unknown life situation feature");
            continue;
        };
        let Some(readings) = readings.as_array() else {
            tracing::warn!(feature = %name, "Ignoring meter reading that is not a list");
            continue;
        };
        if let Some(value) = readings.first().and_then(as_slot_text) {
            events.push(Event::slot(feature.slot_name(), value));
        }
    }

    if let Some(code) = attributes.municipality_code.as_ref().and_then(as_slot_text) {
        events.push(Event::slot(MUNICIPALITY_SLOT, code));
    }
    if let Some(age) = attributes.age.as_ref().and_then(as_slot_text) {
        events.push(Event::slot(AGE_SLOT, age));
    }

    events
}

pub async fn fetch(
    state: &AppState,
    slots: &Map<String, JsonValue>,
    dispatcher: &mut CollectingDispatcher,
) -> Vec<Event> {
    let token = slots
        .raw(SESSION_METADATA_SLOT)
        .and_then(|metadata| metadata.get(METADATA_TOKEN_KEY))
        .and_then(as_slot_text);

    let Some(token) = token else {
        tracing::warn!("Session metadata carries no access token");
        return Vec::new();
    };

    match state.attributes.fetch(&token).await {
        Ok(attributes) => {
            let events = attribute_events(&attributes);
            tracing::info!(slots = events.len(), "Restored transferred session attributes");
            events
        }
        Err(e) => {
            tracing::warn!(error = %e, "Fetching session attributes failed");
            metrics::counter!("collaborator_failures_total", "service" => "attributes").increment(1);
            dispatcher.text(API_ERROR_MESSAGE);
            Vec::new()
        }
    }
}

pub async fn post(
    state: &AppState,
    slots: &Map<String, JsonValue>,
    dispatcher: &mut CollectingDispatcher,
) -> Vec<Event> {
    let channel_id = coerce_text(&slots.slot(TRANSFER_TARGET_SLOT)).ok();
    let Some(target) = channel_id
        .as_deref()
        .and_then(|id| state.transfer_targets.get(id))
    else {
        tracing::warn!(channel_id = ?channel_id, "No transfer target for service channel");
        dispatcher.text(API_ERROR_MESSAGE);
        return Vec::new();
    };

    let validator = SlotValidator::new(slots, &state.registry);
    let body = attribute_transfer(channel_id.clone(), session_attributes(&validator));

    let redirect = match state.attributes.post(&body).await {
        Ok(redirect) => redirect,
        Err(e) => {
            tracing::warn!(error = %e, "Posting session attributes failed");
            metrics::counter!("collaborator_failures_total", "service" => "attributes").increment(1);
            dispatcher.text(API_ERROR_MESSAGE);
            return Vec::new();
        }
    };

    let token = match extract_access_token(&redirect) {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(error = %e, "Attribute transfer returned no access token");
            dispatcher.text(API_ERROR_MESSAGE);
            return Vec::new();
        }
    };

    match transfer_link(target, &token) {
        Ok(link) => {
            tracing::info!(channel_id = ?channel_id, "Session transfer link issued");
            dispatcher.text(&link);
            vec![Event::slot(ACCESS_TOKEN_SLOT, token)]
        }
        Err(e) => {
            tracing::error!(error = %e, target = %target, "Transfer target is not a valid URL");
            dispatcher.text(API_ERROR_MESSAGE);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fetched_attributes_become_text_slots() {
        let attributes: SessionAttributes = serde_json::from_value(json!({
            "age": 41,
            "municipality_code": "091",
            "life_situation_meters": {
                "health": [7, 3],
                "finance": [],
                "telepathy": [1]
            }
        }))
        .unwrap();

        assert_eq!(
            attribute_events(&attributes),
            vec![
                Event::slot("3x10d_health", "7"),
                Event::slot(MUNICIPALITY_SLOT, "091"),
                Event::slot(AGE_SLOT, "41"),
            ]
        );
    }

    #[test]
    fn malformed_meter_entry_keeps_the_rest() {
        let attributes: SessionAttributes = serde_json::from_value(json!({
            "age": 35,
            "municipality_code": "091",
            "life_situation_meters": {"health": 7, "housing": [9]}
        }))
        .unwrap();

        assert_eq!(
            attribute_events(&attributes),
            vec![
                Event::slot("3x10d_housing", "9"),
                Event::slot(MUNICIPALITY_SLOT, "091"),
                Event::slot(AGE_SLOT, "35"),
            ]
        );
    }

    #[test]
    fn null_meters_are_tolerated() {
        let attributes: SessionAttributes =
            serde_json::from_value(json!({"age": 20, "life_situation_meters": null})).unwrap();
        assert_eq!(attribute_events(&attributes), vec![Event::slot(AGE_SLOT, "20")]);
    }

    #[test]
    fn null_attributes_are_skipped() {
        let attributes: SessionAttributes =
            serde_json::from_value(json!({"age": null})).unwrap();
        assert!(attribute_events(&attributes).is_empty());
    }
}
