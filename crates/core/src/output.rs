//! Output sink contract and the fixed user-facing messages

use serde::Serialize;
use serde_json::json;

use crate::results::{InfoKind, ResultItem, ResultSet};
use crate::slot::{BUTTON_PRESSED_INTENT, BUTTON_PRESSED_SLOT};

pub const API_ERROR_MESSAGE: &str = "En valitettavasti pysty hakemaan palveluita juuri nyt.";
pub const NO_SERVICES_MESSAGE: &str = "En löytänyt yhtään tilanteeseesi sopivaa palvelua.";
pub const NO_SERVICE_CHANNELS_MESSAGE: &str = "Palvelulla ei toistaiseksi ole yhtään palvelukanavaa.";
pub const NO_SERVICE_CHANNEL_ITEMS_MESSAGE: &str = "...tätä tietoa ei ole saatavilla.";
pub const RECOMMENDATIONS_HEADER: &str = "Palvelusuositukset:";

/// How a result set is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    List,
    Carousel,
}

/// Postback button; the payload re-enters the dialogue as an intent that
/// sets the pressed-button slot to an item action id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub payload: String,
}

impl Button {
    pub fn postback(title: &str, action_id: &str) -> Self {
        Self {
            title: title.to_string(),
            kind: "postback",
            payload: format!(
                "/{}{}",
                BUTTON_PRESSED_INTENT,
                json!({ BUTTON_PRESSED_SLOT: action_id })
            ),
        }
    }
}

/// Buttons for the item's three action ids
pub fn item_buttons(item: &ResultItem) -> Vec<Button> {
    InfoKind::ALL
        .into_iter()
        .map(|kind| Button::postback(kind.title(), &item.action_id(kind)))
        .collect()
}

/// Where actions send user-visible output
pub trait OutputSink {
    fn text(&mut self, text: &str);

    fn text_with_buttons(&mut self, text: &str, buttons: Vec<Button>);

    fn carousel(&mut self, items: &[ResultItem]);
}

/// Present a result set: a header (or the no-results message), then either
/// one message with buttons per item or a single carousel
pub fn emit_results(sink: &mut dyn OutputSink, results: &ResultSet, layout: Layout) {
    if results.is_empty() {
        sink.text(NO_SERVICES_MESSAGE);
        return;
    }

    sink.text(RECOMMENDATIONS_HEADER);
    match layout {
        Layout::List => {
            for item in &results.recommended {
                sink.text_with_buttons(&format!("Palvelu: {}", item.name), item_buttons(item));
            }
        }
        Layout::Carousel => sink.carousel(&results.recommended),
    }
}
