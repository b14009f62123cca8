// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clipboard capability consumed by the monitor.
//!
//! Platform clipboard access lives behind the [`Clipboard`] trait. The monitor
//! owns exactly one implementation and is the only caller of `set_data`.

use std::collections::BTreeMap;
use std::sync::Arc;

use clipmon_core::{Mode, Settings, Snapshot};
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Cannot set {mode}: {reason}")]
    Rejected { mode: Mode, reason: String },
}

/// Window that owned the clipboard when it changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    title: String,
}

impl WindowInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Access to the process-wide clipboard.
pub trait Clipboard: Send {
    /// Current contents of `mode`, restricted to `formats` (empty = all).
    fn data(&self, mode: Mode, formats: &[String]) -> Result<Snapshot, ClipboardError>;

    /// Replace the contents of `mode`. Implementations usually report the
    /// write back through the change subscription.
    fn set_data(&mut self, mode: Mode, data: Snapshot) -> Result<(), ClipboardError>;

    fn load_settings(&mut self, settings: &Settings);

    /// Subscribe to change notifications.
    fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Mode>;

    fn current_window(&self) -> Option<WindowInfo>;
}

#[derive(Debug, Default)]
struct MemoryState {
    contents: BTreeMap<Mode, Snapshot>,
    subscribers: Vec<mpsc::UnboundedSender<Mode>>,
    subscriptions: usize,
    check_clipboard: Option<bool>,
    check_selection: Option<bool>,
    window_title: Option<String>,
}

impl MemoryState {
    fn watches(&self, mode: Mode) -> bool {
        match mode {
            Mode::Clipboard => self.check_clipboard.unwrap_or(true),
            Mode::Selection => self.check_selection.unwrap_or(true),
            Mode::FindBuffer => true,
        }
    }

    fn notify(&mut self, mode: Mode) {
        if self.watches(mode) {
            self.subscribers.retain(|tx| tx.send(mode).is_ok());
        }
    }
}

/// In-process clipboard.
///
/// Clones share state, so a handle kept outside the monitor can inject
/// changes and inspect what the monitor wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace contents as another application would, notifying subscribers.
    pub fn external_change(&self, mode: Mode, data: Snapshot) {
        let mut state = self.state.lock();
        state.contents.insert(mode, data);
        state.notify(mode);
    }

    pub fn contents(&self, mode: Mode) -> Snapshot {
        self.state
            .lock()
            .contents
            .get(&mode)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_window_title(&self, title: Option<&str>) {
        self.state.lock().window_title = title.map(str::to_string);
    }

    /// Number of `subscribe` calls so far.
    pub fn subscriptions(&self) -> usize {
        self.state.lock().subscriptions
    }
}

impl Clipboard for MemoryClipboard {
    fn data(&self, mode: Mode, formats: &[String]) -> Result<Snapshot, ClipboardError> {
        let state = self.state.lock();
        Ok(state
            .contents
            .get(&mode)
            .map(|s| s.filtered(formats))
            .unwrap_or_default())
    }

    fn set_data(&mut self, mode: Mode, data: Snapshot) -> Result<(), ClipboardError> {
        let mut state = self.state.lock();
        state.contents.insert(mode, data);
        state.notify(mode);
        Ok(())
    }

    fn load_settings(&mut self, settings: &Settings) {
        let mut state = self.state.lock();
        if settings.check_clipboard.is_some() {
            state.check_clipboard = settings.check_clipboard;
        }
        if settings.check_selection.is_some() {
            state.check_selection = settings.check_selection;
        }
    }

    fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Mode> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state.lock();
        state.subscribers.push(tx);
        state.subscriptions += 1;
        rx
    }

    fn current_window(&self) -> Option<WindowInfo> {
        self.state
            .lock()
            .window_title
            .as_deref()
            .map(WindowInfo::new)
    }
}

#[cfg(test)]
#[path = "clipboard_tests.rs"]
mod tests;
