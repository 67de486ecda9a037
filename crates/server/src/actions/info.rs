//! Details of a recommended service, shown when the user presses one of
//! its buttons

use serde_json::{Map, Value as JsonValue};
use servicerec_core::output::{NO_SERVICE_CHANNEL_ITEMS_MESSAGE, NO_SERVICE_CHANNELS_MESSAGE};
use servicerec_core::results::parse_action_id;
use servicerec_core::slot::{BUTTON_PRESSED_SLOT, RECOMMENDATIONS_SLOT};
use servicerec_core::validate::coerce_text;
use servicerec_core::{InfoKind, OutputSink, ResultItem, ResultSet, ServiceChannel, SlotSource};

use super::{CollectingDispatcher, Event};

/// Unique entries in their original order
fn dedup(records: &[String]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for record in records {
        if !out.contains(&record.as_str()) {
            out.push(record);
        }
    }
    out
}

fn selected_item(slots: &Map<String, JsonValue>) -> Option<(ResultItem, InfoKind)> {
    let selection = coerce_text(&slots.slot(BUTTON_PRESSED_SLOT)).ok()?;
    let (id, kind) = parse_action_id(&selection)?;

    let results: ResultSet = serde_json::from_value(slots.raw(RECOMMENDATIONS_SLOT)?.clone()).ok()?;
    results.find(id).cloned().map(|item| (item, kind))
}

pub fn run(slots: &Map<String, JsonValue>, dispatcher: &mut CollectingDispatcher) -> Vec<Event> {
    let Some((item, kind)) = selected_item(slots) else {
        tracing::warn!("Pressed button does not match a stored recommendation");
        dispatcher.text(NO_SERVICE_CHANNEL_ITEMS_MESSAGE);
        return Vec::new();
    };

    if item.channels.is_empty() {
        dispatcher.text(NO_SERVICE_CHANNELS_MESSAGE);
        return Vec::new();
    }

    let heading = match kind {
        InfoKind::ContactInfo => "yhteystiedot",
        InfoKind::MoreInfo => "lisätiedot",
        InfoKind::Homepage => "kotisivut",
    };
    dispatcher.text(&format!("{} -palvelun palvelukanavien {heading}:", item.name));

    for channel in &item.channels {
        dispatcher.text(&format!("{}: ", channel.name));
        match kind {
            InfoKind::ContactInfo => contact_info(channel, dispatcher),
            InfoKind::MoreInfo => listed(dispatcher, "Aukioloajat", &channel.hours),
            InfoKind::Homepage => listed(dispatcher, "Web-sivut", &channel.web_pages),
        }
    }

    Vec::new()
}

fn contact_info(channel: &ServiceChannel, dispatcher: &mut CollectingDispatcher) {
    let emails = dedup(&channel.emails).join("\n");
    let phone_numbers = dedup(&channel.phone_numbers).join("\n");

    if !emails.is_empty() {
        dispatcher.text(&format!("Sähköposti: {emails}"));
    }
    if !phone_numbers.is_empty() {
        dispatcher.text(&format!("Puhelin: {phone_numbers}"));
    }
    if let Some(address) = channel.address.as_deref().filter(|a| !a.is_empty()) {
        dispatcher.text(&format!("Osoite: {address}"));
    }
}

fn listed(dispatcher: &mut CollectingDispatcher, label: &str, entries: &[String]) {
    if entries.is_empty() {
        dispatcher.text(NO_SERVICE_CHANNEL_ITEMS_MESSAGE);
    } else {
        dispatcher.text(&format!("{label}: {}", entries.join("\n")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn texts(dispatcher: CollectingDispatcher) -> Vec<String> {
        dispatcher
            .into_messages()
            .into_iter()
            .filter_map(|m| m.text)
            .collect()
    }

    fn session(pressed: &str) -> Map<String, JsonValue> {
        json!({
            "sr_button_pressed": pressed,
            "sr_recommended_services": {
                "recommended_services": [{
                    "service_id": "s1",
                    "service_name": "Neuvola",
                    "service_description": "",
                    "service_channels": [{
                        "service_channel_name": "Keskusta",
                        "emails": ["a@example.fi", "a@example.fi"],
                        "phone_numbers": ["040 123"],
                        "address": "Kauppakatu 1",
                        "service_hours": [],
                        "web_pages": ["https://neuvola.example.fi"]
                    }]
                }, {
                    "service_id": "s2",
                    "service_name": "Kirjasto",
                    "service_description": "",
                    "service_channels": []
                }]
            }
        })
        .as_object()
        .cloned()
        .unwrap_or_default()
    }

    #[test]
    fn contact_info_deduplicates() {
        let mut dispatcher = CollectingDispatcher::default();
        run(&session("s1_contactinfo"), &mut dispatcher);
        assert_eq!(
            texts(dispatcher),
            vec![
                "Neuvola -palvelun palvelukanavien yhteystiedot:",
                "Keskusta: ",
                "Sähköposti: a@example.fi",
                "Puhelin: 040 123",
                "Osoite: Kauppakatu 1",
            ]
        );
    }

    #[test]
    fn missing_hours_use_notice() {
        let mut dispatcher = CollectingDispatcher::default();
        run(&session("s1_moreinfo"), &mut dispatcher);
        assert_eq!(texts(dispatcher)[2], NO_SERVICE_CHANNEL_ITEMS_MESSAGE);
    }

    #[test]
    fn homepage_lists_pages() {
        let mut dispatcher = CollectingDispatcher::default();
        run(&session("s1_homepage"), &mut dispatcher);
        assert_eq!(texts(dispatcher)[2], "Web-sivut: https://neuvola.example.fi");
    }

    #[test]
    fn service_without_channels() {
        let mut dispatcher = CollectingDispatcher::default();
        run(&session("s2_homepage"), &mut dispatcher);
        assert_eq!(texts(dispatcher), vec![NO_SERVICE_CHANNELS_MESSAGE]);
    }

    #[test]
    fn unknown_selection() {
        let mut dispatcher = CollectingDispatcher::default();
        let events = run(&session("s9_homepage"), &mut dispatcher);
        assert!(events.is_empty());
        assert_eq!(texts(dispatcher), vec![NO_SERVICE_CHANNEL_ITEMS_MESSAGE]);
    }
}
