mod ask;
mod config_cmd;
mod init;
mod serve;

pub use ask::run_ask;
pub use config_cmd::run_config;
pub use init::run_init;
pub use serve::run_serve;

use crate::completion::{Dispatcher, OpenAiClient};
use crate::config::{self, Config};
use crate::error::Result;
use crate::tutor::Tutor;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "tutor-router")]
#[command(author, version, about = "Route student questions to subject tutors backed by an LLM")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (can repeat: -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log format: text (default) or json
    #[arg(long, value_name = "FORMAT", global = true)]
    pub log_format: Option<String>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind, overriding the config file
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Ask a single question and print the answer
    Ask {
        /// The question, passed to the model unmodified
        question: String,

        /// Subject label, e.g. math, chemistry, history
        #[arg(long, default_value = "general")]
        subject: String,

        /// Grade level: elementary, middle, high or uni
        #[arg(long, default_value = "high")]
        grade: String,

        /// Student location
        #[arg(long, default_value = "Unknown")]
        location: String,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,

        /// Show the routed persona and prompt without calling the API
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show config (secrets redacted)
    Show,

    /// Validate config file
    Validate,

    /// Print config file path
    Path,
}

impl Commands {
    /// Whether the command needs the config file read before it runs.
    /// `init` and `config path` only need its location.
    pub fn loads_config(&self) -> bool {
        !matches!(
            self,
            Commands::Init { .. }
                | Commands::Config {
                    command: ConfigCommands::Path
                }
        )
    }
}

/// Build the tutor from config: resolve the API key and construct the completion client once
pub fn build_tutor(config: &Config) -> Result<Tutor> {
    let api_key = config::resolve_api_key(&config.completion)?;
    let client = OpenAiClient::new(&config.completion, api_key)?;
    let dispatcher = Dispatcher::new(Arc::new(client), config.completion.model.clone());
    Ok(Tutor::new(dispatcher, config.routing.unknown_subject))
}
