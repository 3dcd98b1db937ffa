//! Formatting utilities used for CLI status lines and tables.

pub const APP_TITLE: &str = "Task Logger";

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `HH:MM:SS`; hours are not wrapped at 24.
pub fn format_duration(secs: i64) -> String {
    let s = secs.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

/// Compact `H:MM` used in the one-line tracker; the separator blinks
/// between ':' and ' ' on alternate seconds.
pub fn format_duration_compact(secs: i64, show_colon: bool) -> String {
    let s = secs.max(0);
    let separator = if show_colon { ':' } else { ' ' };
    format!("{}{}{:02}", s / 3600, separator, (s % 3600) / 60)
}

pub fn status_line(task: Option<&str>, elapsed_secs: i64) -> String {
    match task {
        Some(name) => format!("{} - {}", name, format_duration(elapsed_secs)),
        None => APP_TITLE.to_string(),
    }
}

pub fn secs2readable(secs: i64) -> String {
    let m = secs.max(0) / 60;
    format!("{:02}h {:02}m", m / 60, m % 60)
}
