//! Output formatting functions.

pub mod pretty;

use serde::Serialize;

use crate::cli::OutputFormat;

/// Renders `value` as compact JSON or through the `pretty` formatter.
pub fn render<T: Serialize>(value: &T, format: OutputFormat, pretty: impl FnOnce(&T) -> String) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(value).unwrap_or_default(),
        OutputFormat::Pretty => pretty(value),
    }
}

/// Renders a bare status message, as `{"message": ...}` in JSON mode.
pub fn render_message(message: &str, format: OutputFormat) -> String {
    render(&serde_json::json!({ "message": message }), format, |_| message.to_string())
}
