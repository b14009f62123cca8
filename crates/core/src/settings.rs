// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitor settings pushed by the owning process.
//!
//! Recognised keys are typed fields. Anything else lands in `extra` so a
//! newer peer can send keys this build does not know about.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current settings schema version.
pub const SETTINGS_VERSION: u32 = 1;

fn default_version() -> u32 {
    SETTINGS_VERSION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Accepted-format allowlist. `None` leaves the current allowlist alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<String>>,

    /// Raise change events for the primary clipboard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_clipboard: Option<bool>,

    /// Raise change events for the selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_selection: Option<bool>,

    /// Unrecognised keys, kept as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            formats: None,
            check_clipboard: None,
            check_selection: None,
            extra: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn with_formats(formats: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            formats: Some(formats.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Names of keys this build ignores.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.extra.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
