// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! clipmon: one-shot tools that talk to a clipboard monitor.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod exit_error;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clipmon_ipc::env;
use tracing_subscriber::EnvFilter;

use crate::commands::{ping, send, set, watch};
use crate::exit_error::ExitError;

#[derive(Parser)]
#[command(name = "clipmon", version, about = "Talk to a clipboard monitor")]
struct Cli {
    /// Server name or socket path
    #[arg(long, global = true, env = "CLIPMON_SERVER_NAME")]
    name: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the monitor answers
    Ping,
    /// Set clipboard or selection contents
    Set(set::SetArgs),
    /// Print clipboard changes as they happen
    Watch(watch::WatchArgs),
    /// Send a raw command and relay its replies
    Send(send::SendArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let name = cli.name.unwrap_or_else(env::server_name);

    match run(cli.command, &name).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("{}", exit.message);
                }
                ExitCode::from(u8::try_from(exit.code).unwrap_or(1))
            }
            None => {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(command: Commands, name: &str) -> Result<()> {
    match command {
        Commands::Ping => ping::handle(name).await,
        Commands::Set(args) => set::handle(args, name).await,
        Commands::Watch(args) => watch::handle(args, name).await,
        Commands::Send(args) => send::handle(args, name).await,
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(env::LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
