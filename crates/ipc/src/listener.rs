// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Passive side: bind the well-known name and adopt accepted connections.

use std::io;
use std::path::Path;

use tokio::net::UnixListener;
use tracing::{debug, info};

use crate::endpoint::Endpoint;
use crate::env;

/// Bind the socket for server `name`.
pub fn bind(name: &str) -> io::Result<UnixListener> {
    bind_path(&env::socket_path(name))
}

/// Bind a socket path, creating its directory and replacing a stale socket.
pub fn bind_path(path: &Path) -> io::Result<UnixListener> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if path.exists() {
        debug!(path = %path.display(), "Removing stale socket");
        std::fs::remove_file(path)?;
    }
    let listener = UnixListener::bind(path)?;
    info!(path = %path.display(), "Listening");
    Ok(listener)
}

/// Accept one connection and wrap it in an endpoint.
pub async fn accept(listener: &UnixListener) -> io::Result<Endpoint> {
    let (stream, _) = listener.accept().await?;
    let endpoint = Endpoint::adopt(stream);
    info!(conn = %endpoint.id(), "Accepted connection");
    Ok(endpoint)
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
