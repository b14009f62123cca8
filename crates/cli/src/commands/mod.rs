// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod ping;
pub mod send;
pub mod set;
pub mod watch;

use anyhow::Result;
use clipmon_ipc::Client;

use crate::exit_error::ExitError;

/// Connect to the server, mapping a connect failure to exit status 1.
pub(crate) async fn connect(name: &str) -> Result<Client> {
    Ok(Client::connect(name).await.map_err(ExitError::from)?)
}
