//! Client for the session attribute transfer API

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value as JsonValue;
use servicerec_core::ParameterSet;

use crate::error::ClientError;

const SERVICE: &str = "attribute transfer";

/// Attributes another service handed over with the session.
///
/// Values are kept loosely typed; they are written back into slots as text.
/// Each meter entry is checked on its own, so one malformed reading does not
/// discard the rest of the response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionAttributes {
    #[serde(default)]
    pub age: Option<JsonValue>,
    #[serde(default)]
    pub municipality_code: Option<JsonValue>,
    #[serde(default)]
    pub life_situation_meters: Option<BTreeMap<String, JsonValue>>,
}

#[derive(Clone)]
pub struct AttributesClient {
    http: reqwest::Client,
    base_url: String,
}

impl AttributesClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/session_attributes", self.base_url)
    }

    /// Fetch the attributes attached to an access token
    pub async fn fetch(&self, access_token: &str) -> Result<SessionAttributes, ClientError> {
        let response = self
            .http
            .get(self.url())
            .query(&[("access_token", access_token)])
            .send()
            .await
            .map_err(|source| ClientError::Request {
                service: SERVICE,
                source,
            })?;

        let response = check_status(response).await?;
        response
            .json::<SessionAttributes>()
            .await
            .map_err(|source| ClientError::Decode {
                service: SERVICE,
                source,
            })
    }

    /// Post attributes for a target channel; returns the redirect URL
    pub async fn post(&self, body: &ParameterSet) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url())
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                service: SERVICE,
                source,
            })?;

        let response = check_status(response).await?;
        let text = response.text().await.map_err(|source| ClientError::Decode {
            service: SERVICE,
            source,
        })?;

        // Some deployments return the URL as a JSON string
        Ok(match serde_json::from_str::<String>(&text) {
            Ok(url) => url,
            Err(_) => text.trim().to_string(),
        })
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        service: SERVICE,
        status,
        body,
    })
}
