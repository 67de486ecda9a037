//! Recommendation results as returned by the recommender

use serde::{Deserialize, Serialize};

/// A contact point (office, phone line, web page) through which a service is provided
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceChannel {
    #[serde(rename = "service_channel_name", default)]
    pub name: String,

    #[serde(default)]
    pub emails: Vec<String>,

    #[serde(default)]
    pub phone_numbers: Vec<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(rename = "service_hours", default)]
    pub hours: Vec<String>,

    #[serde(default)]
    pub web_pages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    #[serde(rename = "service_id")]
    pub id: String,

    #[serde(rename = "service_name", default)]
    pub name: String,

    #[serde(rename = "service_description", default)]
    pub description: String,

    #[serde(rename = "service_channels", default)]
    pub channels: Vec<ServiceChannel>,

    /// Set by reranking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl ResultItem {
    pub fn action_id(&self, kind: InfoKind) -> String {
        format!("{}_{}", self.id, kind.suffix())
    }

    /// The three interactive choices offered for this item
    pub fn action_ids(&self) -> [String; 3] {
        InfoKind::ALL.map(|kind| self.action_id(kind))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(rename = "recommended_services", default)]
    pub recommended: Vec<ResultItem>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.recommended.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&ResultItem> {
        self.recommended.iter().find(|item| item.id == id)
    }
}

/// Which details the user asked to see for an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoKind {
    MoreInfo,
    ContactInfo,
    Homepage,
}

impl InfoKind {
    pub const ALL: [InfoKind; 3] = [InfoKind::MoreInfo, InfoKind::ContactInfo, InfoKind::Homepage];

    pub fn suffix(self) -> &'static str {
        match self {
            InfoKind::MoreInfo => "moreinfo",
            InfoKind::ContactInfo => "contactinfo",
            InfoKind::Homepage => "homepage",
        }
    }

    /// Button title shown next to each recommended service
    pub fn title(self) -> &'static str {
        match self {
            InfoKind::MoreInfo => "Lisätietoja",
            InfoKind::ContactInfo => "Yhteystiedot",
            InfoKind::Homepage => "Palvelun kotisivu",
        }
    }
}

/// Split an action id `<item-id>_<kind>` back into its parts
pub fn parse_action_id(action_id: &str) -> Option<(&str, InfoKind)> {
    let (id, suffix) = action_id.rsplit_once('_')?;
    let kind = InfoKind::ALL.into_iter().find(|k| k.suffix() == suffix)?;
    Some((id, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_recommender_payload() {
        let payload = json!({
            "recommended_services": [{
                "service_id": "a1",
                "service_name": "Neuvola",
                "service_description": "Lasten terveys",
                "service_channels": [{
                    "service_channel_name": "Neuvola Keskusta",
                    "emails": ["neuvola@example.fi"],
                    "phone_numbers": [],
                    "address": null,
                    "service_hours": ["ma-pe 8-16"],
                    "web_pages": []
                }]
            }]
        });
        let results: ResultSet = serde_json::from_value(payload).unwrap();
        let item = &results.recommended[0];
        assert_eq!(item.name, "Neuvola");
        assert_eq!(item.channels[0].hours, vec!["ma-pe 8-16"]);
        assert_eq!(item.channels[0].address, None);
        assert_eq!(item.weight, None);
    }

    #[test]
    fn weight_is_omitted_until_set() {
        let item = ResultItem {
            id: "a1".to_string(),
            ..Default::default()
        };
        assert!(serde_json::to_value(&item).unwrap().get("weight").is_none());
    }

    #[test]
    fn action_ids_round_trip() {
        let item = ResultItem {
            id: "fc66cd13-ae36-4592".to_string(),
            ..Default::default()
        };
        let ids = item.action_ids();
        assert_eq!(ids[0], "fc66cd13-ae36-4592_moreinfo");
        assert_eq!(ids[1], "fc66cd13-ae36-4592_contactinfo");
        assert_eq!(ids[2], "fc66cd13-ae36-4592_homepage");
        assert_eq!(
            parse_action_id(&ids[1]),
            Some(("fc66cd13-ae36-4592", InfoKind::ContactInfo))
        );
        assert_eq!(parse_action_id("a1_unknown"), None);
        assert_eq!(parse_action_id("noseparator"), None);
    }
}
