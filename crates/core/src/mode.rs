// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clipboard modes.
//!
//! A mode names one of the clipboard buffers the monitor observes. The set is
//! small and closed; every per-mode table in the monitor is keyed by it.

use std::fmt;

/// One of the clipboard buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    /// The primary clipboard (Ctrl+C / Ctrl+V).
    Clipboard,
    /// The X11-style mouse selection.
    Selection,
    /// The macOS find pasteboard.
    FindBuffer,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Clipboard, Mode::Selection, Mode::FindBuffer];

    /// Human-readable name, also used as the value of the mode tag attached
    /// to forwarded snapshots.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Clipboard => "clipboard",
            Mode::Selection => "selection",
            Mode::FindBuffer => "find buffer",
        }
    }

    /// Parse a name produced by [`Mode::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Mode::ALL.into_iter().find(|mode| mode.name() == name)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "mode_tests.rs"]
mod tests;
