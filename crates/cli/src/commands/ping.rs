// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `clipmon ping`: check that the monitor answers.

use std::time::Instant;

use anyhow::Result;
use clipmon_core::{describe_code, MonitorCode};
use clipmon_ipc::ClientError;
use clipmon_wire::Message;

use crate::exit_error::ExitError;

pub async fn handle(name: &str) -> Result<()> {
    let mut client = super::connect(name).await?;
    let started = Instant::now();

    let reply = match client.request(&Message::empty(MonitorCode::Ping)).await {
        Ok(reply) => reply,
        // A ping that was never answered is a failed check
        Err(e @ ClientError::Disconnected) => return Err(ExitError::new(1, e.to_string()).into()),
        Err(e) => return Err(ExitError::from(e).into()),
    };
    client.close();

    if !reply.is(MonitorCode::Pong) {
        let message = format!("Unexpected reply: {}", describe_code(reply.code));
        return Err(ExitError::new(1, message).into());
    }
    println!("pong from {} in {:.1?}", name, started.elapsed());
    Ok(())
}
