use crate::config::{self, Config};
use crate::error::Result;
use crate::ui;
use std::path::Path;

/// Run the init command
pub fn run_init(force: bool, config_path: Option<&Path>) -> Result<()> {
    let path = config::resolve_config_path(config_path)?;

    // Check if config already exists
    if path.exists() && !force {
        ui::print_warning(&format!("Config file already exists at {}", path.display()));
        ui::print_info("Use --force to overwrite");
        return Ok(());
    }

    config::save_config_to(&Config::default(), &path)?;

    ui::print_success(&format!("Created config file at {}", path.display()));
    ui::print_info("Set OPENAI_API_KEY (or api_key_command) before running `tutor-router serve`");

    Ok(())
}
