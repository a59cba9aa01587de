use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::model::WeatherResult;

use super::{LookupError, WeatherProvider};

/// Client for the WeatherAPI.com "current conditions" endpoint.
#[derive(Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for WeatherApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    fn current_url(&self) -> String {
        format!("{}/current.json", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

impl From<WaResponse> for WeatherResult {
    fn from(parsed: WaResponse) -> Self {
        WeatherResult::celsius(
            parsed.current.temp_c,
            parsed.current.condition.text,
            parsed.location.name,
        )
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self))]
    async fn current(&self, location: &str) -> Result<WeatherResult, LookupError> {
        // reqwest percent-encodes query pairs, so spaces and non-ASCII names are safe.
        let res = self
            .http
            .get(self.current_url())
            .query(&[("key", self.api_key.as_str()), ("q", location)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(LookupError::Status { status, body: truncate_body(&body) });
        }

        let parsed: WaResponse = serde_json::from_str(&body)?;
        debug!(resolved = %parsed.location.name, "weatherapi current lookup succeeded");

        Ok(parsed.into())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
