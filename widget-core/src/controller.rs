//! Request lifecycle behind the search form.
//!
//! The controller owns the query text and the outcome of the latest search.
//! A search runs in two halves: [`SearchController::begin_search`] validates
//! the query and enters the loading state, [`SearchController::complete_search`]
//! applies the provider's outcome. [`SearchController::submit_search`] does
//! both around a single provider call.
//!
//! Every `begin_search` starts a new generation. Completing a search from an
//! older generation is a no-op, so a slow response can never overwrite the
//! result of a newer one.

use tracing::{debug, info, warn};

use crate::{
    Config,
    model::{INVALID_LOCATION_MESSAGE, LOOKUP_FAILURE_MESSAGE, RequestState, WeatherResult},
    provider::{LookupError, WeatherProvider, provider_from_config},
};

/// A validated search waiting for its provider response.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pending search must be completed or the controller stays loading"]
pub struct PendingSearch {
    generation: u64,
    location: String,
}

impl PendingSearch {
    /// Trimmed location to send to the provider.
    pub fn location(&self) -> &str {
        &self.location
    }
}

#[derive(Debug)]
pub struct SearchController {
    provider: Box<dyn WeatherProvider>,
    query: String,
    result: Option<WeatherResult>,
    error: Option<String>,
    loading: bool,
    generation: u64,
}

impl SearchController {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            query: String::new(),
            result: None,
            error: None,
            loading: false,
            generation: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(provider_from_config(config))
    }

    /// Provider used by [`Self::submit_search`], for callers driving the
    /// split lifecycle themselves.
    pub fn provider(&self) -> &dyn WeatherProvider {
        self.provider.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn result(&self) -> Option<&WeatherResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn state(&self) -> RequestState {
        if self.loading {
            RequestState::Loading
        } else if let Some(error) = &self.error {
            RequestState::Failure(error.clone())
        } else if let Some(result) = &self.result {
            RequestState::Success(result.clone())
        } else {
            RequestState::Idle
        }
    }

    /// Replace the query text verbatim. Validation happens on submit.
    pub fn update_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Validate the query and enter the loading state.
    ///
    /// Returns `None` when the trimmed query is empty; the validation message
    /// is set, any in-flight search is superseded and no request should be
    /// made. The previous result is kept while loading.
    pub fn begin_search(&mut self) -> Option<PendingSearch> {
        let location = self.query.trim();
        if location.is_empty() {
            debug!("rejected blank query");
            self.generation += 1;
            self.loading = false;
            self.error = Some(INVALID_LOCATION_MESSAGE.to_string());
            self.result = None;
            return None;
        }

        self.generation += 1;
        self.loading = true;
        self.error = None;

        debug!(generation = self.generation, location, "search started");
        Some(PendingSearch { generation: self.generation, location: location.to_string() })
    }

    /// Apply the outcome of a pending search and leave the loading state.
    ///
    /// Outcomes for a superseded search are discarded without touching state.
    pub fn complete_search(
        &mut self,
        pending: PendingSearch,
        outcome: Result<WeatherResult, LookupError>,
    ) {
        if pending.generation != self.generation {
            debug!(
                stale = pending.generation,
                current = self.generation,
                "discarding superseded search"
            );
            return;
        }

        match outcome {
            Ok(result) => {
                info!(location = %result.location, "search settled");
                self.result = Some(result);
                self.error = None;
            }
            Err(err) => {
                warn!(location = %pending.location, error = %err, "lookup failed");
                self.error = Some(LOOKUP_FAILURE_MESSAGE.to_string());
                self.result = None;
            }
        }

        self.loading = false;
    }

    /// Validate, fetch and settle one search.
    pub async fn submit_search(&mut self) {
        let Some(pending) = self.begin_search() else {
            return;
        };

        let outcome = self.provider.current(pending.location()).await;
        self.complete_search(pending, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    /// Answers every lookup with a canned result or a 404 and counts calls.
    #[derive(Debug, Clone, Default)]
    struct StubProvider {
        found: bool,
        calls: Arc<AtomicUsize>,
        last_location: Arc<std::sync::Mutex<Option<String>>>,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn current(&self, location: &str) -> Result<WeatherResult, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_location.lock().unwrap() = Some(location.to_string());

            if self.found {
                Ok(WeatherResult::celsius(15.0, "Cloudy", "London"))
            } else {
                Err(not_found())
            }
        }
    }

    fn not_found() -> LookupError {
        LookupError::Status { status: StatusCode::NOT_FOUND, body: String::new() }
    }

    fn controller(found: bool) -> (SearchController, StubProvider) {
        let stub = StubProvider { found, ..Default::default() };
        (SearchController::new(Box::new(stub.clone())), stub)
    }

    #[test]
    fn starts_idle() {
        let (ctrl, _) = controller(true);
        assert_eq!(ctrl.state(), RequestState::Idle);
        assert_eq!(ctrl.query(), "");
    }

    #[test]
    fn update_query_stores_text_verbatim() {
        let (mut ctrl, _) = controller(true);
        ctrl.update_query("  new york ");
        assert_eq!(ctrl.query(), "  new york ");
        assert_eq!(ctrl.state(), RequestState::Idle);
    }

    #[tokio::test]
    async fn blank_query_sets_validation_error_without_request() {
        let (mut ctrl, stub) = controller(true);
        ctrl.update_query("   ");

        ctrl.submit_search().await;

        assert_eq!(ctrl.error(), Some("Please enter a valid location."));
        assert!(ctrl.result().is_none());
        assert!(!ctrl.is_loading());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_query_clears_previous_result() {
        let (mut ctrl, _) = controller(true);
        ctrl.update_query("London");
        ctrl.submit_search().await;
        assert!(ctrl.result().is_some());

        ctrl.update_query("");
        ctrl.submit_search().await;

        assert!(ctrl.result().is_none());
        assert_eq!(ctrl.state(), RequestState::Failure(INVALID_LOCATION_MESSAGE.into()));
    }

    #[tokio::test]
    async fn successful_search_sends_trimmed_location() {
        let (mut ctrl, stub) = controller(true);
        ctrl.update_query("  London  ");

        ctrl.submit_search().await;

        assert_eq!(stub.last_location.lock().unwrap().as_deref(), Some("London"));
        assert_eq!(
            ctrl.state(),
            RequestState::Success(WeatherResult::celsius(15.0, "Cloudy", "London"))
        );
        assert!(ctrl.error().is_none());
    }

    #[tokio::test]
    async fn failed_search_collapses_to_lookup_failure() {
        let (mut ctrl, _) = controller(false);
        ctrl.update_query("Atlantis");

        ctrl.submit_search().await;

        assert_eq!(ctrl.error(), Some("City not found. Please try again."));
        assert!(ctrl.result().is_none());
        assert!(!ctrl.is_loading());
    }

    #[test]
    fn loading_keeps_last_result() {
        let (mut ctrl, _) = controller(true);
        ctrl.update_query("London");
        let first = ctrl.begin_search().expect("valid query");
        ctrl.complete_search(first, Ok(WeatherResult::celsius(15.0, "Cloudy", "London")));

        ctrl.update_query("Paris");
        let _pending = ctrl.begin_search().expect("valid query");

        assert_eq!(ctrl.state(), RequestState::Loading);
        assert_eq!(ctrl.result().map(|r| r.location.as_str()), Some("London"));
    }

    #[test]
    fn loading_clears_previous_error() {
        let (mut ctrl, _) = controller(false);
        ctrl.update_query("");
        assert!(ctrl.begin_search().is_none());
        assert!(ctrl.error().is_some());

        ctrl.update_query("Paris");
        let _pending = ctrl.begin_search().expect("valid query");

        assert!(ctrl.is_loading());
        assert!(ctrl.error().is_none());
    }

    #[test]
    fn superseded_search_is_discarded() {
        let (mut ctrl, _) = controller(true);

        ctrl.update_query("Paris");
        let first = ctrl.begin_search().expect("valid query");
        ctrl.update_query("Rome");
        let second = ctrl.begin_search().expect("valid query");

        ctrl.complete_search(second, Ok(WeatherResult::celsius(25.0, "Sunny", "Rome")));
        ctrl.complete_search(first, Err(not_found()));

        assert_eq!(ctrl.result().map(|r| r.location.as_str()), Some("Rome"));
        assert!(ctrl.error().is_none());
        assert!(!ctrl.is_loading());
    }

    #[test]
    fn stale_completion_does_not_end_loading() {
        let (mut ctrl, _) = controller(true);

        ctrl.update_query("Paris");
        let first = ctrl.begin_search().expect("valid query");
        ctrl.update_query("Rome");
        let second = ctrl.begin_search().expect("valid query");

        ctrl.complete_search(first, Ok(WeatherResult::celsius(5.0, "Rain", "Paris")));
        assert!(ctrl.is_loading());

        ctrl.complete_search(second, Err(not_found()));
        assert!(!ctrl.is_loading());
        assert_eq!(ctrl.error(), Some(LOOKUP_FAILURE_MESSAGE));
    }

    #[test]
    fn blank_submission_supersedes_in_flight_search() {
        let (mut ctrl, _) = controller(true);

        ctrl.update_query("Paris");
        let first = ctrl.begin_search().expect("valid query");
        ctrl.update_query("   ");
        assert!(ctrl.begin_search().is_none());

        assert!(!ctrl.is_loading());
        assert_eq!(ctrl.state(), RequestState::Failure(INVALID_LOCATION_MESSAGE.into()));

        ctrl.complete_search(first, Ok(WeatherResult::celsius(5.0, "Rain", "Paris")));

        assert_eq!(ctrl.error(), Some(INVALID_LOCATION_MESSAGE));
        assert!(ctrl.result().is_none());
        assert!(!ctrl.is_loading());
    }
}
