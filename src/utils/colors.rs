/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

/// Grey out empty cells (`""` or the `-` gap marker).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Day shift in yellow, night shift in blue.
pub fn colorize_shift(value: &str) -> String {
    match value {
        "day" => format!("{YELLOW}{value}{RESET}"),
        "night" => format!("{BLUE}{value}{RESET}"),
        _ => colorize_optional(value),
    }
}
