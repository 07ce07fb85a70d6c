use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use tracing::debug;
use weather_widget_core::{
    Config, FetchOutcome, HttpBackend, WeatherWidget, config::DEFAULT_ORIGIN, view::CityInput,
};

use crate::terminal::TerminalPage;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Current weather for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the backend origin and the default city.
    Configure,

    /// Fetch and show the weather once.
    Show {
        /// City to look up; the configured default city when absent.
        city: Option<String>,

        /// Backend origin, e.g. "http://localhost:5000".
        #[arg(long)]
        origin: Option<String>,
    },

    /// Prompt for cities until Esc or Ctrl-C.
    Run {
        /// Backend origin, e.g. "http://localhost:5000".
        #[arg(long)]
        origin: Option<String>,
    },

    /// Check that the backend is up.
    Health {
        /// Backend origin, e.g. "http://localhost:5000".
        #[arg(long)]
        origin: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Show { city, origin } => {
                let city = city.as_deref().unwrap_or(config.default_city());
                let page = TerminalPage::new(city);
                let widget = WeatherWidget::new(
                    page.regions(),
                    backend_for(&config, origin.as_deref()),
                );

                Ok(exit_code(&widget.fetch_weather().await))
            }
            Command::Run { origin } => {
                let page = TerminalPage::new(config.default_city());
                let widget = WeatherWidget::new(
                    page.regions(),
                    backend_for(&config, origin.as_deref()),
                );

                // Page-ready: whatever the input holds, even if empty.
                widget.fetch_weather().await;

                // The prompt is the trigger; it is only offered while enabled.
                while page.trigger.is_enabled() {
                    let current = page.input.value();
                    let answer = Text::new("City:").with_initial_value(&current).prompt();

                    match answer {
                        Ok(city) => {
                            page.input.set(&city);
                            widget.fetch_weather().await;
                        }
                        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                            break;
                        }
                        Err(err) => return Err(err).context("Failed to read city"),
                    }
                }

                Ok(ExitCode::SUCCESS)
            }
            Command::Health { origin } => {
                let backend = backend_for(&config, origin.as_deref());

                match backend.health().await {
                    Ok(true) => {
                        println!("{} is healthy", backend.origin());
                        Ok(ExitCode::SUCCESS)
                    }
                    Ok(false) => {
                        eprintln!("{} answered but does not report healthy", backend.origin());
                        Ok(ExitCode::FAILURE)
                    }
                    Err(err) => {
                        eprintln!("{}: {err}", backend.origin());
                        Ok(ExitCode::FAILURE)
                    }
                }
            }
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<ExitCode> {
    let origin = Text::new("Backend origin:")
        .with_default(config.origin.as_deref().unwrap_or(DEFAULT_ORIGIN))
        .prompt()
        .context("Failed to read backend origin")?;
    config.set_origin(&origin)?;

    let city = Text::new("Default city:")
        .with_initial_value(config.default_city())
        .with_help_message("Leave empty to start with a blank input")
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(&city);

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(ExitCode::SUCCESS)
}

fn backend_for(config: &Config, origin: Option<&str>) -> HttpBackend {
    let origin = config.resolve_origin(origin);
    debug!(%origin, "resolved backend origin");
    HttpBackend::new(origin)
}

fn exit_code(outcome: &FetchOutcome) -> ExitCode {
    if rendered(outcome) { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn rendered(outcome: &FetchOutcome) -> bool {
    matches!(outcome, FetchOutcome::Rendered(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use weather_widget_core::WidgetError;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_accepts_city_and_origin() {
        let cli = Cli::parse_from(["weather-widget", "show", "New York", "--origin", "http://x:1"]);

        match cli.command {
            Command::Show { city, origin } => {
                assert_eq!(city.as_deref(), Some("New York"));
                assert_eq!(origin.as_deref(), Some("http://x:1"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn origin_flag_overrides_config() {
        let mut config = Config::default();
        config.set_origin("http://configured:5000").unwrap();

        assert_eq!(backend_for(&config, None).origin(), "http://configured:5000");
        assert_eq!(backend_for(&config, Some("http://flag:1/")).origin(), "http://flag:1");
        assert_eq!(backend_for(&Config::default(), None).origin(), DEFAULT_ORIGIN);
    }

    #[test]
    fn failed_fetch_exits_non_zero() {
        assert!(!rendered(&FetchOutcome::Failed(WidgetError::Validation)));
        assert!(!rendered(&FetchOutcome::Ignored));
    }
}
