//! Output formatting functions.

pub mod json;
pub mod pretty;

use crate::cli::OutputFormat;

/// Format a value for output, using `pretty` for human-readable output.
pub fn format_output<T, P>(value: &T, format: OutputFormat, pretty: P) -> String
where
    T: serde::Serialize,
    P: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => json::format_json(value),
        OutputFormat::Pretty => pretty(value),
    }
}
