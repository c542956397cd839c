use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Global quiet mode flag - when true, suppresses non-error output
static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable quiet mode globally
pub fn set_quiet_mode(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::SeqCst);
}

/// Check if quiet mode is enabled
pub fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::SeqCst)
}

/// Spinner shown while waiting on the completion API
pub struct Spinner {
    progress: ProgressBar,
}

impl Spinner {
    /// Start a spinner, or return `None` when output is quiet or not a terminal
    pub fn start(message: &str) -> Option<Self> {
        if is_quiet() || !is_interactive() {
            return None;
        }

        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        progress.set_message(message.to_string());
        progress.enable_steady_tick(Duration::from_millis(100));
        Some(Spinner { progress })
    }

    /// Stop the spinner; failures leave the error message on screen
    pub fn finish<T, E: Display>(&self, outcome: &Result<T, E>) {
        match outcome {
            Ok(_) => self.progress.finish_and_clear(),
            Err(e) => self
                .progress
                .finish_with_message(format!("{} {}", style("✗").red(), e)),
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.progress.is_finished() {
            self.progress.finish_and_clear();
        }
    }
}

/// Print a success message (suppressed in quiet mode)
pub fn print_success(message: &str) {
    if !is_quiet() {
        println!("{} {}", style("✓").green(), message);
    }
}

/// Print an error message (always shown, even in quiet mode)
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}

/// Print a warning message (suppressed in quiet mode)
pub fn print_warning(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", style("!").yellow(), message);
    }
}

/// Print an info message (suppressed in quiet mode)
pub fn print_info(message: &str) {
    if !is_quiet() {
        println!("{} {}", style("→").blue(), message);
    }
}

/// Print a blank line (suppressed in quiet mode)
pub fn print_blank() {
    if !is_quiet() {
        println!();
    }
}

/// Check if running in a TTY
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout)
}
