// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Framed transport for monitor IPC.
//!
//! Wire format: 4-byte length prefix (big-endian) + 4-byte code (big-endian)
//! + payload. The prefix counts code and payload.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod error;
mod frame;
mod payload;
mod stream;

pub use error::{DecodeError, ProtocolError};
pub use frame::{
    encode_frame, FrameDecoder, Message, BIG_MESSAGE_THRESHOLD, CODE_LEN, LENGTH_PREFIX_LEN,
    MAX_FRAME_LEN,
};
pub use payload::{decode_settings, decode_snapshot, encode_settings, encode_snapshot};
#[cfg(any(test, feature = "test-support"))]
pub use stream::read_message;
pub use stream::write_message;
