// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for IPC naming and timeouts.

use std::path::PathBuf;
use std::time::Duration;

/// Base name of the well-known server endpoint.
pub const DEFAULT_SERVER_NAME: &str = "clipmon";

/// Tracing filter directives for the binaries, e.g. `debug` or `clipmon_ipc=trace`.
pub const LOG_FILTER_VAR: &str = "CLIPMON_LOG";

/// Monitor log file. Logs go to stderr when unset.
pub const LOG_FILE_VAR: &str = "CLIPMON_LOG_FILE";

/// Resolve the server name: CLIPMON_SERVER_NAME > clipmon-$CLIPMON_SESSION > clipmon
pub fn server_name() -> String {
    if let Ok(name) = std::env::var("CLIPMON_SERVER_NAME") {
        if !name.is_empty() {
            return name;
        }
    }
    match std::env::var("CLIPMON_SESSION") {
        Ok(session) if !session.is_empty() => format!("{}-{}", DEFAULT_SERVER_NAME, session),
        _ => DEFAULT_SERVER_NAME.to_string(),
    }
}

/// Resolve socket directory: CLIPMON_SOCKET_DIR > XDG_RUNTIME_DIR/clipmon > $TMPDIR/clipmon-$USER
pub fn socket_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CLIPMON_SOCKET_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(runtime) = std::env::var("XDG_RUNTIME_DIR") {
        return PathBuf::from(runtime).join("clipmon");
    }
    let user = std::env::var("USER").unwrap_or_else(|_| "user".to_string());
    std::env::temp_dir().join(format!("clipmon-{}", user))
}

/// Map a server name to its socket path.
///
/// Names containing a `/` are taken as paths; bare names live in
/// [`socket_dir`]. Matching is exact and case-sensitive.
pub fn socket_path(name: &str) -> PathBuf {
    if name.contains('/') {
        PathBuf::from(name)
    } else {
        socket_dir().join(format!("{}.sock", name))
    }
}

/// How long `Endpoint::open` keeps retrying a refused connect.
pub fn connect_timeout() -> Duration {
    std::env::var("CLIPMON_CONNECT_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(1))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
