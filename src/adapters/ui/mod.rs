//! Terminal front-end. Plays the role of the page views: renders store state and
//! drives the use cases.

pub mod banner;
pub mod tui;

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub use tui::TuiInputPort;

/// Prints the welcome banner and applies the prompt theme.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}

/// Steady-ticking spinner for waits such as the start-up session check.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
