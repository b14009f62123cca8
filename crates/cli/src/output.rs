// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use clipmon_core::{Mode, Snapshot, MIME_CLIPBOARD_MODE, MIME_TEXT};
use serde_json::{Map, Value};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render a forwarded snapshot as one output record.
pub fn format_snapshot(snapshot: &Snapshot, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => snapshot_text(snapshot),
        OutputFormat::Json => snapshot_json(snapshot).to_string(),
    }
}

/// Plain text if present, otherwise the list of content formats.
pub fn snapshot_text(snapshot: &Snapshot) -> String {
    match snapshot.get(MIME_TEXT) {
        Some(text) => String::from_utf8_lossy(text).into_owned(),
        None => {
            let formats: Vec<&str> = snapshot.content().map(|(format, _)| format).collect();
            format!("[{}]", formats.join(", "))
        }
    }
}

/// `{"mode": ..., "formats": {...}}`. UTF-8 values are strings; anything
/// else becomes `{"hex": "..."}`.
pub fn snapshot_json(snapshot: &Snapshot) -> Value {
    let mode = snapshot
        .get(MIME_CLIPBOARD_MODE)
        .and_then(|tag| std::str::from_utf8(tag).ok())
        .and_then(Mode::from_name)
        .unwrap_or(Mode::Clipboard);
    let formats: Map<String, Value> = snapshot
        .iter()
        .map(|(format, value)| (format.to_string(), value_json(value)))
        .collect();
    serde_json::json!({ "mode": mode.name(), "formats": formats })
}

fn value_json(value: &[u8]) -> Value {
    match std::str::from_utf8(value) {
        Ok(text) => Value::String(text.to_string()),
        Err(_) => serde_json::json!({ "hex": hex::encode(value) }),
    }
}
