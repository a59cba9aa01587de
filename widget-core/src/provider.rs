use crate::{Config, WeatherResult, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

pub mod weatherapi;

/// Why a lookup failed. Front ends show a single message for all of these;
/// the variants only exist for diagnostics.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request to weather provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather provider responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse weather provider response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for a free-text location.
    async fn current(&self, location: &str) -> Result<WeatherResult, LookupError>;
}

/// Construct the WeatherAPI.com provider from config.
///
/// A missing API key is passed through as-is and will be rejected upstream.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    if !config.has_api_key() {
        tracing::warn!(
            "No API key configured; lookups will fail. \
             Hint: run `weather-widget configure` or set WEATHER_API_KEY."
        );
    }

    Box::new(WeatherApiProvider::new(config.api_key().to_owned(), config.base_url.clone()))
}
