// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures: a monitor on a private socket plus message helpers.

use std::path::PathBuf;
use std::time::Duration;

pub use clipmon_core::{Mode, MonitorCode, Settings, Snapshot, MIME_TEXT};
pub use clipmon_ipc::{Client, ClientError, Endpoint, EndpointEvent};
pub use clipmon_monitor::{Clipboard, MemoryClipboard, Monitor, MonitorExit};
pub use clipmon_wire::{decode_snapshot, encode_settings, encode_snapshot, Message};

use clipmon_ipc::listener;
use tempfile::TempDir;
use tokio::net::UnixStream;
use tokio::task::JoinHandle;

/// Upper bound for anything a spec waits on.
pub const WAIT: Duration = Duration::from_secs(5);

/// A monitor listening on a private socket, serving one connection.
pub struct Session {
    _dir: TempDir,
    pub path: PathBuf,
    pub clipboard: MemoryClipboard,
    monitor: JoinHandle<MonitorExit>,
}

impl Session {
    pub fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monitor.sock");
        let listener = listener::bind_path(&path).unwrap();
        let clipboard = MemoryClipboard::new();

        let served = clipboard.clone();
        let monitor = tokio::spawn(async move {
            let mut endpoint = listener::accept(&listener).await.unwrap();
            Monitor::new(served).run(&mut endpoint).await
        });
        Self {
            _dir: dir,
            path,
            clipboard,
            monitor,
        }
    }

    pub async fn client(&self) -> Client {
        let endpoint = Endpoint::open_path(&self.path, WAIT).await;
        Client::with_endpoint("monitor", endpoint).unwrap()
    }

    pub async fn raw(&self) -> UnixStream {
        UnixStream::connect(&self.path).await.unwrap()
    }

    /// Wait for the monitor to stop and return how it ended.
    pub async fn exit(self) -> MonitorExit {
        tokio::time::timeout(WAIT, self.monitor)
            .await
            .expect("monitor stops")
            .unwrap()
    }
}

pub fn settings_message(settings: &Settings) -> Message {
    Message::new(
        MonitorCode::PushSettings,
        encode_settings(settings).unwrap(),
    )
}

pub fn change_message(mode: Mode, data: &Snapshot) -> Message {
    let code = MonitorCode::change_command(mode).unwrap();
    Message::new(code, encode_snapshot(data).unwrap())
}

/// Next message on `client`, failing the test on timeout or disconnect.
pub async fn next_message(client: &mut Client) -> Message {
    let event = tokio::time::timeout(WAIT, client.next_event())
        .await
        .expect("event within timeout");
    match event {
        Some(EndpointEvent::MessageArrived(message)) => message,
        other => panic!("expected a message, got {:?}", other),
    }
}

/// Round trip a ping so everything sent before it has been handled.
/// Returns the messages that arrived ahead of the `Pong`.
pub async fn sync(client: &mut Client) -> Vec<Message> {
    client.send(&Message::empty(MonitorCode::Ping)).await;
    let mut before = Vec::new();
    loop {
        let message = next_message(client).await;
        if message.is(MonitorCode::Pong) {
            return before;
        }
        before.push(message);
    }
}
