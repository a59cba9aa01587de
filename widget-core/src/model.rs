use serde::{Deserialize, Serialize};

/// Unit literal attached to every result the provider returns.
pub const CELSIUS: &str = "C";

/// Shown when a search is submitted with a blank query.
pub const INVALID_LOCATION_MESSAGE: &str = "Please enter a valid location.";

/// Shown for every lookup failure, whatever the underlying cause.
pub const LOOKUP_FAILURE_MESSAGE: &str = "City not found. Please try again.";

/// Current conditions for one resolved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub temperature: f64,
    pub description: String,
    /// Canonical place name from the provider, not the text the user typed.
    pub location: String,
    pub unit: String,
}

impl WeatherResult {
    pub fn celsius(
        temperature: f64,
        description: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            temperature,
            description: description.into(),
            location: location.into(),
            unit: CELSIUS.to_string(),
        }
    }
}

/// Snapshot of where a search controller is in its request lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Loading,
    Success(WeatherResult),
    Failure(String),
}
