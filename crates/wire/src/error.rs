// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors from framing and stream I/O.
///
/// Any of these ends the connection; no partial message is ever surfaced.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame of {len} bytes exceeds maximum of {max} bytes")]
    FrameTooLarge { len: usize, max: usize },

    #[error("Frame length {0} is too short to hold a message code")]
    FrameTooShort(u32),

    #[error("Connection closed")]
    ConnectionClosed,
}

/// Errors from decoding a payload into the shape its code requires.
///
/// These affect one message only; the connection stays open.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Payload truncated at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Format name at offset {0} is not valid UTF-8")]
    InvalidFormatName(usize),

    #[error("Duplicate format {0:?}")]
    DuplicateFormat(String),

    #[error("{0} trailing bytes after snapshot")]
    TrailingBytes(usize),

    #[error("Value of {0} bytes does not fit the length field")]
    TooLong(usize),

    #[error("Invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}
