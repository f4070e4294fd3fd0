use clap::{Parser, Subcommand};
use geopredict_core::{Config, HttpPredictionService};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "geopredict", version, about = "Landslide risk prediction client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the interactive prediction session (the default).
    Run,

    /// Configure the prediction service endpoint.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Run) {
            Command::Run => run_session().await,
            Command::Configure => configure(),
        }
    }
}

async fn run_session() -> anyhow::Result<()> {
    let config = Config::load()?;
    let service = HttpPredictionService::from_config(&config);
    crate::app::run(service).await
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let service_url = inquire::Text::new("Prediction service URL:")
        .with_initial_value(&config.service_url)
        .prompt()?;

    let request_timeout_secs = inquire::CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.request_timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;

    config.service_url = service_url.trim().trim_end_matches('/').to_string();
    config.request_timeout_secs = request_timeout_secs;
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}
