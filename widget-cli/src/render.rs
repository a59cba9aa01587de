use widget_core::{Clock, RequestState, summarize};

pub const LOADING_LINE: &str = "Loading...";

/// Lines to print for a controller state.
pub fn lines(state: &RequestState, clock: &impl Clock) -> Vec<String> {
    match state {
        RequestState::Idle => Vec::new(),
        RequestState::Loading => vec![LOADING_LINE.to_string()],
        RequestState::Failure(message) => vec![message.clone()],
        RequestState::Success(result) => {
            let summary = summarize(result, clock);
            vec![
                format!("🌡  {}", summary.temperature),
                format!("☁  {}", summary.condition),
                format!("📍 {}", summary.location),
            ]
        }
    }
}
