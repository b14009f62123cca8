// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clipboard snapshots and metadata formats.
//!
//! A snapshot is the complete format → bytes mapping observed for one mode at
//! one instant. Snapshots are replaced wholesale, never merged.

use std::collections::BTreeMap;

/// Plain text format.
pub const MIME_TEXT: &str = "text/plain";

/// Owner of the clipboard content (set by applications that know it).
pub const MIME_OWNER: &str = "application/x-copyq-owner";

/// Title of the window that owned the clipboard when it changed.
pub const MIME_WINDOW_TITLE: &str = "application/x-copyq-owner-window-title";

/// Mode tag attached to snapshots that did not come from the primary clipboard.
pub const MIME_CLIPBOARD_MODE: &str = "application/x-copyq-clipboard-mode";

/// Returns true for internal metadata formats.
///
/// Metadata carries annotations rather than clipboard content. Both the full
/// `application/x-copyq-*` form and the bare `x-copyq-*` form are recognised.
pub fn is_metadata_format(format: &str) -> bool {
    format
        .strip_prefix("application/")
        .unwrap_or(format)
        .starts_with("x-copyq-")
}

/// Format → raw bytes for one clipboard mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    formats: BTreeMap<String, Vec<u8>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot holding a single plain-text entry.
    pub fn text(text: impl Into<String>) -> Self {
        let mut snapshot = Self::new();
        snapshot.insert(MIME_TEXT, text.into());
        snapshot
    }

    /// Insert or replace a format, returning the previous value.
    pub fn insert(
        &mut self,
        format: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) -> Option<Vec<u8>> {
        self.formats.insert(format.into(), value.into())
    }

    pub fn get(&self, format: &str) -> Option<&[u8]> {
        self.formats.get(format).map(Vec::as_slice)
    }

    pub fn contains(&self, format: &str) -> bool {
        self.formats.contains_key(format)
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.formats
            .iter()
            .map(|(format, value)| (format.as_str(), value.as_slice()))
    }

    /// Iterate over content formats only, skipping internal metadata.
    pub fn content(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.iter()
            .filter(|(format, _)| !is_metadata_format(format))
    }

    /// Copy of this snapshot restricted to `allowed` formats.
    ///
    /// An empty allowlist keeps everything. Metadata formats always survive.
    pub fn filtered(&self, allowed: &[String]) -> Snapshot {
        if allowed.is_empty() {
            return self.clone();
        }
        let formats = self
            .formats
            .iter()
            .filter(|(format, _)| {
                is_metadata_format(format) || allowed.iter().any(|a| a == *format)
            })
            .map(|(format, value)| (format.clone(), value.clone()))
            .collect();
        Snapshot { formats }
    }

    /// Total size of all values in bytes.
    pub fn byte_size(&self) -> usize {
        self.formats.values().map(Vec::len).sum()
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot
where
    K: Into<String>,
    V: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let formats = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Snapshot { formats }
    }
}

impl IntoIterator for Snapshot {
    type Item = (String, Vec<u8>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.formats.into_iter()
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
