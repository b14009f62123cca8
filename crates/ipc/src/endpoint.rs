// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connection endpoints.
//!
//! An [`Endpoint`] owns one end of a local byte stream and exposes it as an
//! ordered stream of [`EndpointEvent`]s. Every endpoint emits exactly one
//! terminal event (`Disconnected` or `ConnectFailed`) and nothing after it.
//!
//! ```text
//! Connecting ──connect──▶ Ready ──EOF / error / close──▶ Closed
//!     │
//!     └──refused / timed out──▶ Failed
//! ```

use std::fmt;
use std::path::Path;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use clipmon_wire::{write_message, FrameDecoder, Message, ProtocolError};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::net::UnixStream;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::env;

type BoxReader = Pin<Box<dyn AsyncRead + Send>>;
type BoxWriter = Pin<Box<dyn AsyncWrite + Send>>;

const READ_CHUNK: usize = 64 * 1024;
const CONNECT_RETRY_INTERVAL: Duration = Duration::from_millis(100);

static LAST_CONNECTION_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique connection number, for logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    fn next() -> Self {
        Self(LAST_CONNECTION_ID.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Ready,
    Closed,
    Failed,
}

impl ConnectionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ConnectionState::Closed | ConnectionState::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointEvent {
    MessageArrived(Message),
    Disconnected,
    ConnectFailed,
}

impl EndpointEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EndpointEvent::MessageArrived(_))
    }
}

/// Closes an endpoint from another task.
///
/// A blocked `next_event` or `wait_for_data` returns promptly with the
/// disconnect indication.
#[derive(Debug, Clone)]
pub struct CloseHandle(CancellationToken);

impl CloseHandle {
    pub fn close(&self) {
        self.0.cancel();
    }
}

pub struct Endpoint {
    id: ConnectionId,
    state: ConnectionState,
    reader: Option<BoxReader>,
    writer: Option<BoxWriter>,
    decoder: FrameDecoder,
    read_buf: Box<[u8]>,
    /// Terminal event waiting to be delivered.
    terminal: Option<EndpointEvent>,
    /// Terminal event already delivered.
    finished: bool,
    cancel: CancellationToken,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("buffered", &self.decoder.buffered_len())
            .finish()
    }
}

impl Endpoint {
    fn new() -> Self {
        Self {
            id: ConnectionId::next(),
            state: ConnectionState::Connecting,
            reader: None,
            writer: None,
            decoder: FrameDecoder::new(),
            read_buf: vec![0u8; READ_CHUNK].into_boxed_slice(),
            terminal: None,
            finished: false,
            cancel: CancellationToken::new(),
        }
    }

    /// Connect to the server listening under `name` (active side).
    ///
    /// Always returns an endpoint; when the server cannot be reached it is in
    /// the `Failed` state and its only event is `ConnectFailed`.
    pub async fn open(name: &str) -> Self {
        Self::open_path(&env::socket_path(name), env::connect_timeout()).await
    }

    /// Connect to a socket path, retrying refused connects for `retry_window`
    /// in case the server has just started.
    pub async fn open_path(path: &Path, retry_window: Duration) -> Self {
        let mut endpoint = Self::new();
        match connect_with_retry(path, retry_window).await {
            Ok(stream) => {
                debug!(conn = %endpoint.id, path = %path.display(), "Connected");
                endpoint.attach(stream);
            }
            Err(e) => {
                warn!(conn = %endpoint.id, path = %path.display(), "Cannot connect: {}", e);
                endpoint.state = ConnectionState::Failed;
                endpoint.terminal = Some(EndpointEvent::ConnectFailed);
            }
        }
        endpoint
    }

    /// Wrap an already-connected stream (passive side).
    pub fn adopt<S>(stream: S) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let mut endpoint = Self::new();
        debug!(conn = %endpoint.id, "Adopted connection");
        endpoint.attach(stream);
        endpoint
    }

    fn attach<S>(&mut self, stream: S)
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (reader, writer) = tokio::io::split(stream);
        self.reader = Some(Box::pin(reader));
        self.writer = Some(Box::pin(writer));
        self.state = ConnectionState::Ready;
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn close_handle(&self) -> CloseHandle {
        CloseHandle(self.cancel.clone())
    }

    /// Send a message. Dropped (and logged) once the connection is gone.
    pub async fn send(&mut self, message: &Message) {
        if self.state != ConnectionState::Ready || self.cancel.is_cancelled() {
            debug!(conn = %self.id, code = message.code, "Dropping message, connection is closed");
            return;
        }
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        let bytes = message.payload.len();
        debug!(conn = %self.id, code = message.code, bytes, "Sending message");
        match write_message(writer, message).await {
            Ok(()) => {}
            Err(e @ ProtocolError::FrameTooLarge { .. }) => {
                error!(conn = %self.id, code = message.code, "Cannot send message: {}", e);
            }
            Err(e) => {
                warn!(conn = %self.id, "Failed to send message: {}", e);
                self.mark_closed();
            }
        }
    }

    /// Next event in arrival order; `None` after the terminal event.
    ///
    /// Cancel-safe: dropping the future loses no bytes.
    pub async fn next_event(&mut self) -> Option<EndpointEvent> {
        loop {
            if self.finished {
                return None;
            }
            if self.cancel.is_cancelled() {
                self.mark_closed();
            }
            if self.state == ConnectionState::Ready {
                match self.decoder.next_message() {
                    Ok(Some(message)) => {
                        debug!(
                            conn = %self.id,
                            code = message.code,
                            bytes = message.payload.len(),
                            "Message received"
                        );
                        return Some(EndpointEvent::MessageArrived(message));
                    }
                    Ok(None) => {}
                    Err(e) => {
                        error!(conn = %self.id, "Failed to read message: {}", e);
                        self.mark_closed();
                    }
                }
            }
            if let Some(event) = self.terminal.take() {
                self.finished = true;
                return Some(event);
            }
            self.fill().await;
        }
    }

    /// Block until a complete message is buffered or the connection ends.
    ///
    /// Returns true when `next_event` will yield a message without waiting.
    /// Meant for one-shot request/response use, outside a dispatch loop.
    pub async fn wait_for_data(&mut self) -> bool {
        loop {
            if self.cancel.is_cancelled() {
                self.mark_closed();
            }
            if self.state != ConnectionState::Ready {
                return false;
            }
            if self.decoder.is_ready() {
                return true;
            }
            self.fill().await;
        }
    }

    /// True when a reassembled message is waiting, i.e. the current burst
    /// of input has not been fully dispatched yet.
    pub fn has_buffered_message(&self) -> bool {
        self.state == ConnectionState::Ready
            && !self.cancel.is_cancelled()
            && self.decoder.is_ready()
    }

    /// Close the connection. Buffered input is discarded and the next event
    /// is `Disconnected` (unless the endpoint already failed).
    pub fn close(&mut self) {
        if !self.state.is_terminal() {
            debug!(conn = %self.id, "Disconnecting");
        }
        self.cancel.cancel();
        self.mark_closed();
    }

    async fn fill(&mut self) {
        let Some(reader) = self.reader.as_mut() else {
            self.mark_closed();
            return;
        };
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            read = reader.read(&mut self.read_buf) => Some(read),
        };
        match result {
            None => self.mark_closed(),
            Some(Ok(0)) => {
                debug!(conn = %self.id, "Disconnected from peer");
                self.mark_closed();
            }
            Some(Ok(n)) => self.decoder.push(&self.read_buf[..n]),
            Some(Err(e)) => {
                warn!(conn = %self.id, "Socket error: {}", e);
                self.mark_closed();
            }
        }
    }

    fn mark_closed(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        if self.decoder.is_mid_message() {
            error!(conn = %self.id, "Socket disconnected before receiving message");
        }
        self.decoder.clear();
        self.reader = None;
        self.writer = None;
        self.state = ConnectionState::Closed;
        self.terminal = Some(EndpointEvent::Disconnected);
    }
}

async fn connect_with_retry(path: &Path, retry_window: Duration) -> std::io::Result<UnixStream> {
    let deadline = Instant::now() + retry_window;
    let mut waiting_logged = false;
    loop {
        match UnixStream::connect(path).await {
            Ok(stream) => return Ok(stream),
            Err(e) if Instant::now() + CONNECT_RETRY_INTERVAL <= deadline => {
                if !waiting_logged {
                    info!("Waiting for server to start ({})", e);
                    waiting_logged = true;
                }
                tokio::time::sleep(CONNECT_RETRY_INTERVAL).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
