// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local IPC connections for the clipboard monitor.
//!
//! Endpoints wrap one Unix stream each and surface framed messages as an
//! ordered event stream. The client role, listener helpers and keepalive
//! logic are built on top of them.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod client;
pub mod endpoint;
pub mod env;
pub mod input;
pub mod keepalive;
pub mod listener;

pub use client::{exit_code_for, Client, ClientError, Reply};
pub use endpoint::{CloseHandle, ConnectionId, ConnectionState, Endpoint, EndpointEvent};
pub use input::InputReader;
pub use keepalive::{Keepalive, KeepaliveAction};
