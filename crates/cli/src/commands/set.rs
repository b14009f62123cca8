// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `clipmon set`: replace the clipboard or selection contents.

use anyhow::Result;
use clap::Args;
use clipmon_core::{MonitorCode, Snapshot, MIME_TEXT};
use clipmon_ipc::{ClientError, InputReader};
use clipmon_wire::{encode_snapshot, Message};
use tracing::debug;

use crate::exit_error::ExitError;

#[derive(Args)]
pub struct SetArgs {
    /// Write the selection instead of the clipboard
    #[arg(long)]
    pub selection: bool,

    /// Format to store the value under
    #[arg(long, default_value = MIME_TEXT)]
    pub format: String,

    /// Value to set. If omitted, reads from stdin
    pub text: Option<String>,
}

enum Source {
    Arg(String),
    Stdin(InputReader),
}

pub async fn handle(args: SetArgs, name: &str) -> Result<()> {
    // Start reading stdin before connecting so a slow producer overlaps the connect
    let source = match args.text {
        Some(text) => Source::Arg(text),
        None => Source::Stdin(InputReader::stdin()?),
    };

    let mut client = match super::connect(name).await {
        Ok(client) => client,
        Err(e) => {
            if let Source::Stdin(reader) = source {
                reader.abort();
            }
            return Err(e);
        }
    };

    let value = match source {
        Source::Arg(text) => text.into_bytes(),
        Source::Stdin(reader) => reader.input().await?,
    };

    let code = if args.selection {
        MonitorCode::ChangeSelection
    } else {
        MonitorCode::ChangeClipboard
    };
    let mut data = Snapshot::new();
    data.insert(args.format, value);
    client
        .send(&Message::new(code, encode_snapshot(&data)?))
        .await;

    // Round trip so the write is handled before we hang up
    match client.request(&Message::empty(MonitorCode::Ping)).await {
        Ok(_) | Err(ClientError::Disconnected) => {
            debug!("Clipboard change delivered");
            client.close();
            Ok(())
        }
        Err(e) => Err(ExitError::from(e).into()),
    }
}
