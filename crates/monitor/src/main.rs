// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! clipmon-monitor: clipboard monitor process.

use std::process::ExitCode;

use clap::Parser;
use clipmon_ipc::{env, listener, Endpoint};
use clipmon_monitor::{logging, MemoryClipboard, Monitor, MonitorError, MonitorExit};
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "clipmon-monitor", version, about = "Clipboard monitor process")]
struct Args {
    /// Server name or socket path
    #[arg(long, env = "CLIPMON_SERVER_NAME")]
    name: Option<String>,

    /// Connect to the server instead of listening for it
    #[arg(long)]
    connect: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let _guard = logging::init("info");

    let name = args.name.unwrap_or_else(env::server_name);
    let code = match run(&name, args.connect).await {
        Ok(exit) => exit.exit_code(),
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

async fn run(name: &str, connect: bool) -> Result<MonitorExit, MonitorError> {
    let mut endpoint = if connect {
        Endpoint::open(name).await
    } else {
        accept_one(name).await?
    };
    let mut monitor = Monitor::new(MemoryClipboard::new());
    Ok(monitor.run(&mut endpoint).await)
}

/// Listen under `name` and serve the first connection only.
async fn accept_one(name: &str) -> Result<Endpoint, MonitorError> {
    let path = env::socket_path(name);
    let listener = listener::bind(name).map_err(|source| MonitorError::Bind {
        path: path.clone(),
        source,
    })?;

    let endpoint = listener::accept(&listener)
        .await
        .map_err(MonitorError::Accept);
    drop(listener);
    if std::fs::remove_file(&path).is_ok() {
        debug!(path = %path.display(), "Removed socket");
    }
    endpoint
}
