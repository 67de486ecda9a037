//! Dialogue actions served over the action webhook
//!
//! The dialogue engine posts the action name and the conversation's slots;
//! an action answers with slot events and messages for the user.

mod info;
mod recommend;
mod session;
mod transfer;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue, json};
use servicerec_core::output::item_buttons;
use servicerec_core::{Button, Layout, OutputSink, ResultItem};

use crate::AppState;
use crate::error::AppError;
use recommend::Query;

/// Every action this server can run
pub const ACTION_NAMES: [&str; 11] = [
    "action_service_list_by_life_situation",
    "action_service_carousel_by_life_situation",
    "action_service_list_by_text_search",
    "action_service_carousel_by_text_search",
    "action_service_list_by_whiteblack_text_search_sorted",
    "action_service_carousel_by_whiteblack_text_search_sorted",
    "action_show_info",
    "action_restart_chat",
    "action_slot_reset",
    "action_fetch_session_attributes",
    "action_post_session_attributes",
];

/// Webhook request body
#[derive(Debug, Deserialize)]
pub struct ActionCall {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: Tracker,
}

/// The part of the conversation tracker actions read
#[derive(Debug, Default, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub slots: Map<String, JsonValue>,
}

/// Session changes returned to the dialogue engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    #[serde(rename = "slot")]
    SlotSet { name: String, value: JsonValue },
    Restart,
    ResetSlots,
}

impl Event {
    pub fn slot(name: &str, value: impl Into<JsonValue>) -> Self {
        Event::SlotSet {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

/// One message for the user
#[derive(Debug, Default, Serialize)]
pub struct BotMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<JsonValue>,
}

/// Collects messages while an action runs
#[derive(Debug, Default)]
pub struct CollectingDispatcher {
    messages: Vec<BotMessage>,
}

impl CollectingDispatcher {
    pub fn into_messages(self) -> Vec<BotMessage> {
        self.messages
    }
}

impl OutputSink for CollectingDispatcher {
    fn text(&mut self, text: &str) {
        self.messages.push(BotMessage {
            text: Some(text.to_string()),
            ..Default::default()
        });
    }

    fn text_with_buttons(&mut self, text: &str, buttons: Vec<Button>) {
        self.messages.push(BotMessage {
            text: Some(text.to_string()),
            buttons,
            ..Default::default()
        });
    }

    fn carousel(&mut self, items: &[ResultItem]) {
        let elements: Vec<JsonValue> = items
            .iter()
            .map(|item| {
                json!({
                    "title": item.name,
                    "image_url": null,
                    "buttons": item_buttons(item),
                })
            })
            .collect();

        self.messages.push(BotMessage {
            attachment: Some(json!({
                "type": "template",
                "payload": {
                    "template_type": "generic",
                    "elements": elements,
                }
            })),
            ..Default::default()
        });
    }
}

/// Webhook response body
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub events: Vec<Event>,
    pub responses: Vec<BotMessage>,
}

/// Run the named action against the tracker's slots
pub async fn run(state: &AppState, name: &str, tracker: &Tracker) -> Result<ActionResponse, AppError> {
    let mut dispatcher = CollectingDispatcher::default();
    let slots = &tracker.slots;

    let events = match name {
        "action_service_list_by_life_situation" => {
            recommend::run(state, slots, &mut dispatcher, Query::LifeSituation, Layout::List).await
        }
        "action_service_carousel_by_life_situation" => {
            recommend::run(state, slots, &mut dispatcher, Query::LifeSituation, Layout::Carousel)
                .await
        }
        "action_service_list_by_text_search" => {
            recommend::run(state, slots, &mut dispatcher, Query::TextSearch, Layout::List).await
        }
        "action_service_carousel_by_text_search" => {
            recommend::run(state, slots, &mut dispatcher, Query::TextSearch, Layout::Carousel).await
        }
        "action_service_list_by_whiteblack_text_search_sorted" => {
            recommend::run(state, slots, &mut dispatcher, Query::Reranked, Layout::List).await
        }
        "action_service_carousel_by_whiteblack_text_search_sorted" => {
            recommend::run(state, slots, &mut dispatcher, Query::Reranked, Layout::Carousel).await
        }
        "action_show_info" => info::run(slots, &mut dispatcher),
        "action_restart_chat" => session::restart(),
        "action_slot_reset" => session::reset_slots(),
        "action_fetch_session_attributes" => transfer::fetch(state, slots, &mut dispatcher).await,
        "action_post_session_attributes" => transfer::post(state, slots, &mut dispatcher).await,
        _ => return Err(AppError::ActionNotFound(name.to_string())),
    };

    Ok(ActionResponse {
        events,
        responses: dispatcher.into_messages(),
    })
}
