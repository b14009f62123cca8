// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keepalive specs against a live monitor.

use std::time::Duration;

use clipmon_ipc::{Keepalive, KeepaliveAction};
use tokio::time::Instant;

use crate::prelude::*;

#[tokio::test]
async fn live_monitor_keeps_connection_alive() {
    let session = Session::start();
    let mut client = session.client().await;
    let mut keepalive = Keepalive::with_timing(Instant::now(), Duration::from_millis(20), WAIT, 1);

    for _ in 0..3 {
        tokio::time::sleep_until(keepalive.deadline()).await;
        assert_eq!(
            keepalive.on_deadline(Instant::now()),
            KeepaliveAction::SendPing
        );
        client.send(&Message::empty(MonitorCode::Ping)).await;

        let reply = next_message(&mut client).await;
        keepalive.on_message(&reply, Instant::now());
        assert!(!keepalive.is_awaiting_pong());
    }
}

#[tokio::test]
async fn silent_peer_is_given_up() {
    let session = Session::start();
    let _client = session.client().await;
    let tick = Duration::from_millis(5);
    let mut keepalive = Keepalive::with_timing(Instant::now(), tick, tick, 2);

    // Pings are never sent, so nothing comes back
    let mut pings = 0;
    loop {
        tokio::time::sleep_until(keepalive.deadline()).await;
        match keepalive.on_deadline(Instant::now()) {
            KeepaliveAction::SendPing => pings += 1,
            KeepaliveAction::GiveUp => break,
        }
    }
    assert_eq!(pings, 3);
}
