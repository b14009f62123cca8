// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitor side of the clipboard protocol.
//!
//! One [`Monitor`] serves one endpoint. Messages, clipboard change events and
//! the deferred flush are all processed on the task that drives [`Monitor::run`],
//! so none of the state below needs locking.

use std::collections::BTreeMap;

use clipmon_core::{
    describe_code, Mode, MonitorCode, Snapshot, SETTINGS_VERSION, MIME_CLIPBOARD_MODE, MIME_OWNER,
    MIME_WINDOW_TITLE,
};
use clipmon_ipc::{Endpoint, EndpointEvent};
use clipmon_wire::{decode_settings, decode_snapshot, encode_snapshot, Message};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::clipboard::Clipboard;
use crate::dedup::has_same_data;
use crate::pending::PendingWrites;

/// How the dispatch loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorExit {
    Disconnected,
    ConnectFailed,
}

impl MonitorExit {
    pub fn exit_code(self) -> i32 {
        match self {
            MonitorExit::Disconnected => 0,
            MonitorExit::ConnectFailed => 1,
        }
    }
}

enum Step {
    Event(Option<EndpointEvent>),
    Changed(Mode),
}

pub struct Monitor<C: Clipboard> {
    clipboard: C,
    /// Accepted-format allowlist; empty keeps every format.
    formats: Vec<String>,
    /// Last snapshot forwarded (or written) per mode.
    last_data: BTreeMap<Mode, Snapshot>,
    pending: PendingWrites,
    /// Set once by the first accepted `PushSettings`.
    changes: Option<mpsc::UnboundedReceiver<Mode>>,
}

impl<C: Clipboard> Monitor<C> {
    pub fn new(clipboard: C) -> Self {
        Self {
            clipboard,
            formats: Vec::new(),
            last_data: BTreeMap::new(),
            pending: PendingWrites::new(),
            changes: None,
        }
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    pub fn is_subscribed(&self) -> bool {
        self.changes.is_some()
    }

    pub fn last_data(&self, mode: Mode) -> Option<&Snapshot> {
        self.last_data.get(&mode)
    }

    pub fn pending(&self) -> &PendingWrites {
        &self.pending
    }

    /// Handle one incoming message, returning the reply to send, if any.
    ///
    /// Clipboard writes are only queued here; see [`Monitor::flush_pending`].
    pub fn handle_message(&mut self, message: Message) -> Option<Message> {
        match message.monitor_code() {
            Some(MonitorCode::Ping) => Some(Message::empty(MonitorCode::Pong)),
            Some(MonitorCode::PushSettings) => {
                self.push_settings(&message.payload);
                None
            }
            Some(code @ (MonitorCode::ChangeClipboard | MonitorCode::ChangeSelection)) => {
                if let Some(mode) = code.target_mode() {
                    self.queue_write(mode, &message.payload);
                }
                None
            }
            _ => {
                warn!(
                    code = %describe_code(message.code),
                    bytes = message.payload.len(),
                    "Unhandled message"
                );
                None
            }
        }
    }

    fn push_settings(&mut self, payload: &[u8]) {
        let settings = match decode_settings(payload) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring malformed settings: {}", e);
                return;
            }
        };

        if settings.version > SETTINGS_VERSION {
            debug!(version = settings.version, "Settings from a newer peer");
        }
        for key in settings.unknown_keys() {
            debug!(key, "Ignoring unknown setting");
        }

        if let Some(formats) = &settings.formats {
            debug!(formats = ?formats, "Accepted formats updated");
            self.formats = formats.clone();
        }

        if self.changes.is_none() {
            self.changes = Some(self.clipboard.subscribe());
            info!("Watching clipboard changes");
        }

        self.clipboard.load_settings(&settings);
    }

    fn queue_write(&mut self, mode: Mode, payload: &[u8]) {
        let data = match decode_snapshot(payload) {
            Ok(data) => data,
            Err(e) => {
                warn!(%mode, "Ignoring malformed clipboard data: {}", e);
                return;
            }
        };
        debug!(%mode, formats = data.len(), "Queued clipboard write");
        if !self.pending.insert(mode, data) {
            debug!(%mode, "Clipboard flush already scheduled");
        }
    }

    /// Apply queued writes. Called at the idle point between bursts.
    ///
    /// The written snapshot becomes the baseline, so the clipboard's own
    /// change event for it is recognised as a duplicate.
    pub fn flush_pending(&mut self) {
        if !self.pending.is_scheduled() {
            return;
        }
        for (mode, data) in self.pending.drain() {
            let baseline = data.filtered(&self.formats);
            match self.clipboard.set_data(mode, data) {
                Ok(()) => {
                    debug!(%mode, "Clipboard set");
                    self.last_data.insert(mode, baseline);
                }
                Err(e) => warn!(%mode, "Failed to set clipboard: {}", e),
            }
        }
    }

    /// React to a clipboard change event. Returns the `ClipboardChanged`
    /// message to forward, or `None` if nothing new was observed.
    pub fn on_clipboard_changed(&mut self, mode: Mode) -> Option<Message> {
        let mut data = match self.clipboard.data(mode, &self.formats) {
            Ok(data) => data,
            Err(e) => {
                warn!(%mode, "Failed to read clipboard: {}", e);
                return None;
            }
        };

        let unchanged = match self.last_data.get(&mode) {
            Some(last) => has_same_data(&data, last),
            None => has_same_data(&data, &Snapshot::new()),
        };
        if unchanged {
            debug!(%mode, "Ignoring unchanged clipboard");
            return None;
        }

        if mode != Mode::Clipboard {
            data.insert(MIME_CLIPBOARD_MODE, mode.name());
        }
        if !data.contains(MIME_OWNER) && !data.contains(MIME_WINDOW_TITLE) {
            if let Some(window) = self.clipboard.current_window() {
                data.insert(MIME_WINDOW_TITLE, window.title());
            }
        }

        let payload = encode_snapshot(&data);
        debug!(%mode, formats = data.len(), bytes = data.byte_size(), "Clipboard changed");
        self.last_data.insert(mode, data);

        match payload {
            Ok(payload) => Some(Message::new(MonitorCode::ClipboardChanged, payload)),
            Err(e) => {
                error!(%mode, "Cannot forward clipboard: {}", e);
                None
            }
        }
    }

    /// Serve `endpoint` until it reaches a terminal event.
    pub async fn run(&mut self, endpoint: &mut Endpoint) -> MonitorExit {
        info!(conn = %endpoint.id(), "Monitor started");
        loop {
            let step = match self.changes.as_mut() {
                Some(changes) => tokio::select! {
                    biased;
                    event = endpoint.next_event() => Step::Event(event),
                    Some(mode) = changes.recv() => Step::Changed(mode),
                },
                None => Step::Event(endpoint.next_event().await),
            };

            match step {
                Step::Event(Some(EndpointEvent::MessageArrived(message))) => {
                    if let Some(reply) = self.handle_message(message) {
                        endpoint.send(&reply).await;
                    }
                }
                Step::Event(Some(EndpointEvent::ConnectFailed)) => {
                    error!(conn = %endpoint.id(), "Cannot connect to server");
                    self.flush_pending();
                    return MonitorExit::ConnectFailed;
                }
                Step::Event(Some(EndpointEvent::Disconnected) | None) => {
                    info!(conn = %endpoint.id(), "Connection closed, stopping monitor");
                    // Scheduled writes still land, even when a framing error
                    // ended the stream before the idle point.
                    self.flush_pending();
                    return MonitorExit::Disconnected;
                }
                Step::Changed(mode) => {
                    if let Some(message) = self.on_clipboard_changed(mode) {
                        endpoint.send(&message).await;
                    }
                }
            }

            if !endpoint.has_buffered_message() {
                self.flush_pending();
            }
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
