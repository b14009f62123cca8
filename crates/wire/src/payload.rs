// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Payload encodings for monitor messages.
//!
//! Snapshots use a compact binary layout (big-endian like the frame header):
//!
//! ```text
//! snapshot := count(u32) { name_len(u32) name(utf-8) value_len(u32) value }*
//! ```
//!
//! Settings travel as a JSON object.

use clipmon_core::{Settings, Snapshot};

use crate::error::DecodeError;

pub fn encode_snapshot(snapshot: &Snapshot) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(4 + snapshot.byte_size() + snapshot.len() * 16);
    put_len(&mut out, snapshot.len())?;
    for (format, value) in snapshot.iter() {
        put_bytes(&mut out, format.as_bytes())?;
        put_bytes(&mut out, value)?;
    }
    Ok(out)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, DecodeError> {
    let mut reader = Reader { bytes, offset: 0 };
    let count = reader.u32()?;

    let mut snapshot = Snapshot::new();
    for _ in 0..count {
        let name_offset = reader.offset;
        let name = reader.bytes()?;
        let name =
            std::str::from_utf8(name).map_err(|_| DecodeError::InvalidFormatName(name_offset))?;
        let value = reader.bytes()?;
        if snapshot.insert(name, value).is_some() {
            return Err(DecodeError::DuplicateFormat(name.to_string()));
        }
    }

    let rest = bytes.len() - reader.offset;
    if rest > 0 {
        return Err(DecodeError::TrailingBytes(rest));
    }
    Ok(snapshot)
}

pub fn encode_settings(settings: &Settings) -> Result<Vec<u8>, DecodeError> {
    Ok(serde_json::to_vec(settings)?)
}

pub fn decode_settings(bytes: &[u8]) -> Result<Settings, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

fn put_len(out: &mut Vec<u8>, len: usize) -> Result<(), DecodeError> {
    let len = u32::try_from(len).map_err(|_| DecodeError::TooLong(len))?;
    out.extend_from_slice(&len.to_be_bytes());
    Ok(())
}

fn put_bytes(out: &mut Vec<u8>, bytes: &[u8]) -> Result<(), DecodeError> {
    put_len(out, bytes.len())?;
    out.extend_from_slice(bytes);
    Ok(())
}

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, needed: usize) -> Result<&'a [u8], DecodeError> {
        let available = self.bytes.len() - self.offset;
        if available < needed {
            return Err(DecodeError::Truncated {
                offset: self.offset,
                needed,
                available,
            });
        }
        let slice = &self.bytes[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(slice)
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(raw))
    }

    fn bytes(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.u32()? as usize;
        self.take(len)
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
