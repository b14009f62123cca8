// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `clipmon send`: generic one-shot command.

use std::io::Read;

use anyhow::Result;
use clap::Args;
use clipmon_wire::Message;

use crate::exit_error::ExitError;

#[derive(Args)]
pub struct SendArgs {
    /// Message code
    #[arg(long, allow_hyphen_values = true)]
    pub code: i32,

    /// Payload. `-` reads it from stdin; omitted sends an empty payload
    pub payload: Option<String>,
}

pub async fn handle(args: SendArgs, name: &str) -> Result<()> {
    let payload = match args.payload.as_deref() {
        Some("-") => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
        Some(text) => text.as_bytes().to_vec(),
        None => Vec::new(),
    };

    let mut client = super::connect(name).await?;
    let command = Message::new(args.code, payload);
    let status = client
        .run_command(&command, &mut std::io::stdout(), &mut std::io::stderr())
        .await
        .map_err(ExitError::from)?;
    client.close();

    if status != 0 {
        return Err(ExitError::silent(status).into());
    }
    Ok(())
}
