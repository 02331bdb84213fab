/*!
 * Terminal feedback for Treegen
 */

use std::fmt::Display;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

/// Create a ticking spinner with the given message
pub fn spinner(message: &str) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_message(message.to_string());
    progress
}

/// Replace the spinner with a success line
pub fn succeed(progress: &ProgressBar, message: &str) {
    progress.finish_and_clear();
    println!("{} {}", "✔".green(), message);
}

/// Replace the spinner with a failure line
pub fn fail(progress: &ProgressBar, message: &str) {
    progress.finish_and_clear();
    eprintln!("{} {}", "✖".red(), message);
}

/// Informational line
pub fn info(message: &str) {
    println!("{}", format!("ℹ️  {}", message).cyan());
}

/// Warning line
pub fn warn(message: &str) {
    println!("{}", format!("⚠️  {}", message).yellow());
}

/// Error line
pub fn error(message: &str) {
    eprintln!("{}", format!("❌ {}", message).red());
}

/// Dimmed detail line for the underlying cause of an error
pub fn error_detail(err: &dyn Display) {
    eprintln!("{}", err.to_string().dimmed());
}
