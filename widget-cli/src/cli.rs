use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::debug;
use widget_core::{Config, RequestState, SearchController, SystemClock};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Current weather for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com API key.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City or location name.
        location: String,

        /// Print the raw result as JSON instead of the summary.
        #[arg(long)]
        json: bool,
    },

    /// Search repeatedly from a prompt until cancelled.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        debug!(command = ?self.command, "dispatching");
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, json } => show(location, json).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn load_config() -> anyhow::Result<Config> {
    let config = Config::load()?.with_env_overrides();
    debug!(base_url = %config.base_url, has_api_key = config.has_api_key(), "loaded config");
    Ok(config)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    let path = config.save()?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn show(location: String, json: bool) -> anyhow::Result<()> {
    let config = load_config()?;
    let mut controller = SearchController::from_config(&config);

    controller.update_query(location);
    controller.submit_search().await;

    match controller.state() {
        RequestState::Failure(message) => bail!(message),
        RequestState::Success(result) if json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        state => {
            for line in render::lines(&state, &SystemClock) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let config = load_config()?;
    let mut controller = SearchController::from_config(&config);

    loop {
        let input = match Text::new("Enter a city name:").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read location"),
        };

        controller.update_query(input);

        // Render the loading line before awaiting, the way the form disables its button.
        let Some(pending) = controller.begin_search() else {
            print_state(&controller);
            continue;
        };
        print_state(&controller);

        let outcome = controller.provider().current(pending.location()).await;
        controller.complete_search(pending, outcome);
        print_state(&controller);
    }

    Ok(())
}

fn print_state(controller: &SearchController) {
    for line in render::lines(&controller.state(), &SystemClock) {
        println!("{line}");
    }
}
