// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async frame I/O over byte streams.

#[cfg(any(test, feature = "test-support"))]
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{info, trace};

use crate::error::ProtocolError;
use crate::frame::{encode_frame, Message, BIG_MESSAGE_THRESHOLD, LENGTH_PREFIX_LEN};
#[cfg(any(test, feature = "test-support"))]
use crate::frame::{CODE_LEN, MAX_FRAME_LEN};

/// Write one framed message and flush.
pub async fn write_message<W>(writer: &mut W, message: &Message) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let frame = encode_frame(message)?;
    let body_len = frame.len() - LENGTH_PREFIX_LEN;
    if body_len > BIG_MESSAGE_THRESHOLD {
        info!("Sending big message: {} MiB", body_len / 1024 / 1024);
    }
    trace!(code = message.code, bytes = body_len, "write message");

    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Read exactly one framed message.
///
/// Endpoints read through [`crate::FrameDecoder`]; this is for peers in tests.
///
/// EOF before the first prefix byte is [`ProtocolError::ConnectionClosed`];
/// EOF anywhere later is an I/O error, since a message was cut short.
#[cfg(any(test, feature = "test-support"))]
pub async fn read_message<R>(reader: &mut R) -> Result<Message, ProtocolError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut prefix = [0u8; LENGTH_PREFIX_LEN];
    let first = reader.read(&mut prefix).await?;
    if first == 0 {
        return Err(ProtocolError::ConnectionClosed);
    }
    reader.read_exact(&mut prefix[first..]).await?;

    let len = u32::from_be_bytes(prefix);
    if (len as usize) < CODE_LEN {
        return Err(ProtocolError::FrameTooShort(len));
    }
    if len as usize > MAX_FRAME_LEN {
        return Err(ProtocolError::FrameTooLarge {
            len: len as usize,
            max: MAX_FRAME_LEN,
        });
    }

    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body).await?;

    let payload = body.split_off(CODE_LEN);
    let mut code = [0u8; CODE_LEN];
    code.copy_from_slice(&body);
    Ok(Message {
        code: i32::from_be_bytes(code),
        payload,
    })
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
