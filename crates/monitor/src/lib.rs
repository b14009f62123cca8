// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clipboard monitor: serves the clipboard protocol on one connection and
//! bridges it to a [`Clipboard`] implementation.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod clipboard;
pub mod dedup;
pub mod dispatcher;
mod error;
pub mod logging;
pub mod pending;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, WindowInfo};
pub use dedup::has_same_data;
pub use dispatcher::{Monitor, MonitorExit};
pub use error::MonitorError;
pub use pending::PendingWrites;
