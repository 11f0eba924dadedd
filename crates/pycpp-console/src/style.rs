//! ANSI palette for rich output.

pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const BRIGHT_RED: &str = "\x1b[91m";
pub(crate) const CYAN: &str = "\x1b[36m";
pub(crate) const MAGENTA: &str = "\x1b[35m";
pub(crate) const BOLD: &str = "\x1b[1m";
pub(crate) const DIM: &str = "\x1b[2m";
pub(crate) const RESET: &str = "\x1b[0m";

/// Wrap `text` in `code` when colour is enabled.
pub(crate) fn paint(text: &str, code: &str, enabled: bool) -> String {
    if enabled {
        format!("{code}{text}{RESET}")
    } else {
        text.to_string()
    }
}
