use crate::cli::build_tutor;
use crate::config::Config;
use crate::error::Result;
use crate::tutor::{self, TutorRequest, TutorResponse};
use crate::ui;

/// Run the ask command
pub async fn run_ask(config: Config, request: TutorRequest, json: bool, dry_run: bool) -> Result<()> {
    if dry_run {
        let prepared = tutor::prepare(&request, config.routing.unknown_subject)?;
        ui::print_info(&format!(
            "Persona: {} (subject tag '{}', temperature {})",
            prepared.routed.handler.persona, prepared.routed.subject_tag, prepared.routed.handler.temperature
        ));
        ui::print_info(&format!("Grade: {}", prepared.grade));
        ui::print_info(&format!("Quiz mode: {}", prepared.prompt.quiz));
        println!("--- system ---\n{}", prepared.prompt.system);
        println!("--- user ---\n{}", prepared.prompt.user);
        return Ok(());
    }

    let tutor = build_tutor(&config)?;

    let spinner = ui::Spinner::start(&format!("Asking {}...", tutor.model()));
    let result = tutor.answer(&request).await;
    if let Some(ref spinner) = spinner {
        spinner.finish(&result);
    }

    let response = result?;
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response);
    }
    Ok(())
}

fn print_response(response: &TutorResponse) {
    println!("{}", response.answer);
    if let Some(ref quiz) = response.quiz {
        ui::print_blank();
        ui::print_success(&format!("Parsed {} quiz questions", quiz.len()));
    }
}
