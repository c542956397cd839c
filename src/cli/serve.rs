use crate::cli::build_tutor;
use crate::config::Config;
use crate::error::{Result, TutorError};
use crate::server::{self, AppState};
use crate::ui;
use std::sync::Arc;

/// Run the serve command
pub async fn run_serve(config: Config, bind: Option<String>) -> Result<()> {
    if let Err(errors) = config.validate() {
        for error in &errors {
            ui::print_error(error);
        }
        return Err(TutorError::ConfigInvalid("Config validation failed".to_string()));
    }

    let tutor = build_tutor(&config)?;
    let bind_addr = bind.unwrap_or_else(|| config.server.bind_addr.clone());

    ui::print_info(&format!(
        "Serving on http://{} with model {}",
        bind_addr,
        tutor.model()
    ));

    let state = AppState {
        tutor: Arc::new(tutor),
    };
    server::serve(&bind_addr, state).await
}
