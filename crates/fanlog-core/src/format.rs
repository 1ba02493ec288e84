//! Line formatting shared by the text destinations
//!
//! A formatted line is `{prefix} {message} {metadata}\n`, where the metadata
//! string is every `[key: value]` pair in insertion order, then
//! `[label: ...]`, then `[error: ...]` when an error was supplied.

use std::fmt::Write;

use crate::types::{Level, LogEvent};

/// How the level prefix is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefixStyle {
    /// `[ LEVEL ]` for every level
    #[default]
    Plain,
    /// Warning and above carry a marker in front of the brackets
    Decorated,
}

/// Render the level prefix
pub fn prefix(level: Level, style: PrefixStyle) -> String {
    let plain = format!("[ {} ]", level.label());
    if style == PrefixStyle::Plain || !level.is_problem() {
        return plain;
    }
    let marker = match level {
        Level::Warning => "\u{26A0}\u{FE0F}",
        Level::Error => "\u{274C}",
        _ => "\u{1F525}",
    };
    format!("{} {}", marker, plain)
}

/// Render metadata, label and error as bracketed pairs
pub fn metadata_string(event: &LogEvent) -> String {
    let mut out = String::new();
    for (key, value) in event.metadata.iter() {
        let _ = write!(out, "[{}: {}]", key, value);
    }
    let _ = write!(out, "[label: {}]", event.label);
    if let Some(error) = &event.error {
        let _ = write!(out, "[error: {}]", error);
    }
    out
}

/// Render a complete newline-terminated line
pub fn format_line(event: &LogEvent, style: PrefixStyle) -> String {
    format!(
        "{} {} {}\n",
        prefix(event.level, style),
        event.message,
        metadata_string(event)
    )
}
