mod cli;
mod completion;
mod config;
mod error;
mod server;
mod tutor;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, LogFormat};
use error::{ExitStatus, TutorError};
use std::process::ExitCode;
use tutor::TutorRequest;

#[tokio::main]
async fn main() -> ExitCode {
    // Pick up OPENAI_API_KEY and friends from a local .env, if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    ui::set_quiet_mode(cli.quiet);

    // `init` and `config path` must work even when the config file is missing or broken
    let config = if cli.command.loads_config() {
        match config::load_config(cli.config.as_deref()) {
            Ok(config) => Some(config),
            Err(e) => {
                ui::print_error(&e.to_string());
                return e.exit_status().into();
            }
        }
    } else {
        None
    };

    let format = match cli.log_format.as_deref() {
        Some("json") => LogFormat::Json,
        Some(_) => LogFormat::Text,
        None => config
            .as_ref()
            .map(|config| config.settings.log_format)
            .unwrap_or_default(),
    };
    let serving = matches!(cli.command, Commands::Serve { .. });
    setup_logging(cli.verbose, cli.quiet, serving, format);

    match run_command(cli, config).await {
        Ok(status) => status.into(),
        Err(e) => {
            ui::print_error(&e.to_string());
            e.exit_status().into()
        }
    }
}

async fn run_command(cli: Cli, config: Option<Config>) -> Result<ExitStatus, TutorError> {
    let config_path = cli.config.as_deref();
    let loaded = |config: Option<Config>| match config {
        Some(config) => Ok(config),
        None => config::load_config(config_path),
    };

    match cli.command {
        Commands::Serve { bind } => {
            cli::run_serve(loaded(config)?, bind).await?;
            Ok(ExitStatus::Success)
        }

        Commands::Ask {
            question,
            subject,
            grade,
            location,
            json,
            dry_run,
        } => {
            let request = TutorRequest {
                question,
                subject,
                grade,
                location,
            };
            cli::run_ask(loaded(config)?, request, json, dry_run).await?;
            Ok(ExitStatus::Success)
        }

        Commands::Config { command } => {
            cli::run_config(command, config, config_path)?;
            Ok(ExitStatus::Success)
        }

        Commands::Init { force } => {
            cli::run_init(force, config_path)?;
            Ok(ExitStatus::Success)
        }
    }
}

/// Logs go to stderr so `ask` output stays clean on stdout.
/// The server logs at info by default, one-shot commands at warn.
fn setup_logging(verbose: u8, quiet: bool, serving: bool, format: LogFormat) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match (verbose, serving) {
            (0, false) => "warn",
            (0, true) | (1, _) => "info",
            (2, _) => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .init();
        }
    }
}
