// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! clipmon-core: shared types for the clipboard monitor and its clients

pub mod code;
pub mod mode;
pub mod settings;
pub mod snapshot;

pub use code::{describe_code, CommandStatus, MonitorCode};
pub use mode::Mode;
pub use settings::{Settings, SETTINGS_VERSION};
pub use snapshot::{
    is_metadata_format, Snapshot, MIME_CLIPBOARD_MODE, MIME_OWNER, MIME_TEXT, MIME_WINDOW_TITLE,
};
