// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `clipmon watch`: stream clipboard changes from the monitor.

use anyhow::Result;
use clap::Args;
use clipmon_core::{describe_code, MonitorCode, Settings};
use clipmon_ipc::{exit_code_for, EndpointEvent, Keepalive, KeepaliveAction};
use clipmon_wire::{decode_snapshot, encode_settings, Message};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::exit_error::ExitError;
use crate::output::{format_snapshot, OutputFormat};

#[derive(Args)]
pub struct WatchArgs {
    /// Only report these formats (repeatable)
    #[arg(long = "format", value_name = "FORMAT")]
    pub formats: Vec<String>,

    /// Ignore selection changes
    #[arg(long)]
    pub no_selection: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

/// Settings pushed to the monitor for these arguments.
pub fn settings(args: &WatchArgs) -> Settings {
    Settings {
        formats: (!args.formats.is_empty()).then(|| args.formats.clone()),
        check_clipboard: Some(true),
        check_selection: Some(!args.no_selection),
        ..Settings::default()
    }
}

pub async fn handle(args: WatchArgs, name: &str) -> Result<()> {
    let mut client = super::connect(name).await?;
    let payload = encode_settings(&settings(&args))?;
    client
        .send(&Message::new(MonitorCode::PushSettings, payload))
        .await;

    let mut keepalive = Keepalive::new(Instant::now());
    loop {
        tokio::select! {
            event = client.next_event() => {
                let message = match event {
                    Some(EndpointEvent::MessageArrived(message)) => message,
                    Some(terminal) => {
                        let code = exit_code_for(&terminal).unwrap_or(0);
                        debug!(?terminal, "Watch ended");
                        if code != 0 {
                            return Err(ExitError::silent(code).into());
                        }
                        return Ok(());
                    }
                    None => return Ok(()),
                };
                keepalive.on_message(&message, Instant::now());
                print_message(message, args.output);
            }
            _ = tokio::time::sleep_until(keepalive.deadline()) => {
                match keepalive.on_deadline(Instant::now()) {
                    KeepaliveAction::SendPing => {
                        client.send(&Message::empty(MonitorCode::Ping)).await;
                    }
                    KeepaliveAction::GiveUp => {
                        client.close();
                        return Err(ExitError::new(1, "Connection timeout").into());
                    }
                }
            }
        }
    }
}

fn print_message(message: Message, output: OutputFormat) {
    match message.monitor_code() {
        Some(MonitorCode::ClipboardChanged) => match decode_snapshot(&message.payload) {
            Ok(snapshot) => println!("{}", format_snapshot(&snapshot, output)),
            Err(e) => warn!("Ignoring malformed clipboard data: {}", e),
        },
        Some(MonitorCode::Log) => {
            info!(target: "clipmon::monitor", "{}", String::from_utf8_lossy(&message.payload));
        }
        Some(MonitorCode::Pong) => {}
        _ => debug!("Unhandled message: {}", describe_code(message.code)),
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
