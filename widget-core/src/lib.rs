//! Core library for the weather widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The search controller that drives one lookup per submission
//! - Abstraction over the weather provider and its WeatherAPI.com implementation
//! - Pure classifiers that turn a result into display messages
//!
//! It is used by `widget-cli`, but any other front end can drive the same controller.

pub mod classifier;
pub mod config;
pub mod controller;
pub mod model;
pub mod provider;

pub use classifier::{Clock, FixedClock, Summary, SystemClock, summarize};
pub use config::Config;
pub use controller::{PendingSearch, SearchController};
pub use model::{RequestState, WeatherResult};
pub use provider::{LookupError, WeatherProvider};
