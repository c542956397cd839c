use crate::cli::ConfigCommands;
use crate::config::{self, Config};
use crate::error::{Result, TutorError};
use crate::ui;
use std::path::Path;

/// Run config subcommands. `path` never reads the file; the others load it
/// unless the caller already has.
pub fn run_config(command: ConfigCommands, config: Option<Config>, config_path: Option<&Path>) -> Result<()> {
    let loaded = |config: Option<Config>| match config {
        Some(config) => Ok(config),
        None => config::load_config(config_path),
    };

    match command {
        ConfigCommands::Show => show_config(&loaded(config)?),
        ConfigCommands::Validate => validate_config(&loaded(config)?),
        ConfigCommands::Path => print_path(config_path),
    }
}

fn show_config(config: &Config) -> Result<()> {
    let redacted = config::redact_config(config);
    let content = toml::to_string_pretty(&redacted)
        .map_err(|e| TutorError::Config(format!("Failed to serialize config: {}", e)))?;
    println!("{}", content);
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    match config.validate() {
        Ok(warnings) => {
            for warning in warnings {
                ui::print_warning(&warning);
            }
            ui::print_success("Config is valid");
        }
        Err(errors) => {
            for error in errors {
                ui::print_error(&error);
            }
            return Err(TutorError::ConfigInvalid("Config validation failed".to_string()));
        }
    }

    match config::resolve_api_key(&config.completion) {
        Ok(_) => ui::print_success("API key is available"),
        Err(e) => ui::print_warning(&e.to_string()),
    }

    Ok(())
}

fn print_path(config_path: Option<&Path>) -> Result<()> {
    let path = config::resolve_config_path(config_path)?;
    println!("{}", path.display());
    Ok(())
}
