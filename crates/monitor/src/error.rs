// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the monitor before a connection is served.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Cannot listen on {}: {source}", path.display())]
    Bind { path: PathBuf, source: io::Error },

    #[error("Failed to accept connection: {0}")]
    Accept(io::Error),
}

impl MonitorError {
    pub fn exit_code(&self) -> i32 {
        1
    }
}
