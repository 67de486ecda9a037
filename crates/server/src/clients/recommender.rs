//! Client for the service recommender API

use std::time::{Duration, Instant};

use servicerec_core::{RecommendationRequest, ResultSet};

use crate::error::ClientError;

const SERVICE: &str = "service recommender";

/// Client for the recommender's `recommend_service` and `text_search` endpoints
#[derive(Clone)]
pub struct RecommenderClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RecommenderClient {
    /// Create a new client against `base_url`
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Run one recommendation query
    pub async fn recommend(&self, request: &RecommendationRequest) -> Result<ResultSet, ClientError> {
        let url = format!("{}/{}", self.base_url, request.method.path());
        let started = Instant::now();

        let mut builder = self.http.post(&url).json(&request.params);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let result = self.send(builder).await;

        metrics::histogram!(
            "recommender_request_duration_seconds",
            "method" => request.method.path()
        )
        .record(started.elapsed().as_secs_f64());

        if let Ok(results) = &result {
            tracing::debug!(
                method = request.method.path(),
                results = results.recommended.len(),
                "Recommender responded"
            );
        }
        result
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<ResultSet, ClientError> {
        let response = builder.send().await.map_err(|source| ClientError::Request {
            service: SERVICE,
            source,
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                service: SERVICE,
                status,
                body,
            });
        }

        response
            .json::<ResultSet>()
            .await
            .map_err(|source| ClientError::Decode {
                service: SERVICE,
                source,
            })
    }
}
