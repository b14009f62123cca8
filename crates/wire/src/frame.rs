// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Length-prefixed message frames.
//!
//! ```text
//! message := length(u32 BE) code(i32 BE) payload(byte[length - 4])
//! ```
//!
//! The length prefix counts the code and payload, not itself.

use clipmon_core::MonitorCode;

use crate::error::ProtocolError;

/// Size of the length prefix.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Size of the code field at the start of every body.
pub const CODE_LEN: usize = 4;

/// Largest body accepted in either direction.
pub const MAX_FRAME_LEN: usize = 256 * 1024 * 1024;

/// Bodies above this size are logged when sent or received.
pub const BIG_MESSAGE_THRESHOLD: usize = 5 * 1024 * 1024;

/// One framed message. The payload is opaque to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub code: i32,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new(code: impl Into<i32>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            code: code.into(),
            payload: payload.into(),
        }
    }

    /// Message with an empty payload.
    pub fn empty(code: impl Into<i32>) -> Self {
        Self::new(code, Vec::new())
    }

    pub fn monitor_code(&self) -> Option<MonitorCode> {
        MonitorCode::from_code(self.code)
    }

    pub fn is(&self, code: MonitorCode) -> bool {
        self.code == code.code()
    }
}

/// Serialize a message into a complete frame.
pub fn encode_frame(message: &Message) -> Result<Vec<u8>, ProtocolError> {
    let body_len = CODE_LEN + message.payload.len();
    let too_large = || ProtocolError::FrameTooLarge {
        len: body_len,
        max: MAX_FRAME_LEN,
    };
    if body_len > MAX_FRAME_LEN {
        return Err(too_large());
    }
    let prefix = u32::try_from(body_len).map_err(|_| too_large())?;

    let mut frame = Vec::with_capacity(LENGTH_PREFIX_LEN + body_len);
    frame.extend_from_slice(&prefix.to_be_bytes());
    frame.extend_from_slice(&message.code.to_be_bytes());
    frame.extend_from_slice(&message.payload);
    Ok(frame)
}

/// Reassembles frames from bytes arriving in arbitrary chunks.
///
/// Bytes are appended with [`push`](Self::push); complete messages are split
/// off one at a time by [`next_message`](Self::next_message). A body is never
/// decoded before all of its declared bytes are buffered.
#[derive(Debug)]
pub struct FrameDecoder {
    buf: Vec<u8>,
    body_len: Option<usize>,
    max_frame_len: usize,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::with_max_frame_len(MAX_FRAME_LEN)
    }

    pub fn with_max_frame_len(max_frame_len: usize) -> Self {
        Self {
            buf: Vec::new(),
            body_len: None,
            max_frame_len,
        }
    }

    /// Append newly arrived bytes.
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Split off the next complete message, if one is fully buffered.
    ///
    /// On error the buffer is discarded; the stream can no longer be framed.
    pub fn next_message(&mut self) -> Result<Option<Message>, ProtocolError> {
        let body_len = match self.body_len {
            Some(len) => len,
            None => {
                let Some(len) = self.peek_length() else {
                    return Ok(None);
                };
                if let Err(e) = self.check_length(len) {
                    self.clear();
                    return Err(e);
                }
                self.buf.drain(..LENGTH_PREFIX_LEN);
                let len = len as usize;
                if len > BIG_MESSAGE_THRESHOLD {
                    tracing::info!("Receiving big message: {} MiB", len / 1024 / 1024);
                }
                self.body_len = Some(len);
                len
            }
        };

        if self.buf.len() < body_len {
            return Ok(None);
        }

        let body: Vec<u8> = self.buf.drain(..body_len).collect();
        self.body_len = None;

        let mut code = [0u8; CODE_LEN];
        code.copy_from_slice(&body[..CODE_LEN]);
        Ok(Some(Message {
            code: i32::from_be_bytes(code),
            payload: body[CODE_LEN..].to_vec(),
        }))
    }

    /// True when `next_message` would return a message (or an error)
    /// without further input.
    pub fn is_ready(&self) -> bool {
        match self.body_len {
            Some(len) => self.buf.len() >= len,
            None => match self.peek_length() {
                Some(len) => {
                    self.check_length(len).is_err()
                        || self.buf.len() - LENGTH_PREFIX_LEN >= len as usize
                }
                None => false,
            },
        }
    }

    /// True while part of a frame is buffered.
    pub fn is_mid_message(&self) -> bool {
        self.body_len.is_some() || !self.buf.is_empty()
    }

    pub fn buffered_len(&self) -> usize {
        self.buf.len()
    }

    /// Drop any partially received frame.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.body_len = None;
    }

    fn peek_length(&self) -> Option<u32> {
        let prefix: [u8; LENGTH_PREFIX_LEN] = self.buf.get(..LENGTH_PREFIX_LEN)?.try_into().ok()?;
        Some(u32::from_be_bytes(prefix))
    }

    fn check_length(&self, len: u32) -> Result<(), ProtocolError> {
        if (len as usize) < CODE_LEN {
            return Err(ProtocolError::FrameTooShort(len));
        }
        if len as usize > self.max_frame_len {
            return Err(ProtocolError::FrameTooLarge {
                len: len as usize,
                max: self.max_frame_len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
