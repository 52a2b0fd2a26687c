//! Status messages for terminal output.
//!
//! Status goes to stderr; standard output carries only the mode line.

use console::style;

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold().for_stderr(), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        style("⚠").yellow().bold().for_stderr(),
        style(message).yellow().for_stderr()
    );
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!(
        "{} {}",
        style("✗").red().bold().for_stderr(),
        style(message).red().for_stderr()
    );
}

/// Disable colored status output when requested or unsupported.
pub fn init_colors(no_color: bool) {
    if no_color || !crate::logger::should_use_colors() {
        console::set_colors_enabled_stderr(false);
    }
}
