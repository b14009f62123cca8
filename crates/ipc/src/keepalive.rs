// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ping/pong liveness checks for a long-lived monitor connection.
//!
//! The owner pings every [`PING_INTERVAL`]. After a ping it waits
//! [`PONG_TIMEOUT`] for traffic; any message restarts the wait and `Pong`
//! ends it. Unanswered pings are resent up to [`MAX_PING_RETRIES`] times.

use std::time::Duration;

use clipmon_core::MonitorCode;
use clipmon_wire::Message;
use tokio::time::Instant;
use tracing::info;

pub const PING_INTERVAL: Duration = Duration::from_secs(8);
pub const PONG_TIMEOUT: Duration = Duration::from_secs(4);
pub const MAX_PING_RETRIES: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepaliveAction {
    SendPing,
    GiveUp,
}

#[derive(Debug)]
pub struct Keepalive {
    deadline: Instant,
    awaiting_pong: bool,
    retries: u32,
    interval: Duration,
    timeout: Duration,
    max_retries: u32,
}

impl Keepalive {
    /// Start with a ping due immediately.
    pub fn new(now: Instant) -> Self {
        Self::with_timing(now, PING_INTERVAL, PONG_TIMEOUT, MAX_PING_RETRIES)
    }

    pub fn with_timing(
        now: Instant,
        interval: Duration,
        timeout: Duration,
        max_retries: u32,
    ) -> Self {
        Self {
            deadline: now,
            awaiting_pong: false,
            retries: 0,
            interval,
            timeout,
            max_retries,
        }
    }

    /// When [`on_deadline`](Self::on_deadline) must next be called.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_awaiting_pong(&self) -> bool {
        self.awaiting_pong
    }

    pub fn on_message(&mut self, message: &Message, now: Instant) {
        if !self.awaiting_pong {
            return;
        }
        if message.is(MonitorCode::Pong) {
            if self.retries > 0 {
                info!("Pong received on try {}/{}", self.retries, self.max_retries);
            }
            self.retries = 0;
            self.awaiting_pong = false;
            self.deadline = now + self.interval;
        } else {
            self.deadline = now + self.timeout;
        }
    }

    pub fn on_deadline(&mut self, now: Instant) -> KeepaliveAction {
        if !self.awaiting_pong {
            self.awaiting_pong = true;
            self.deadline = now + self.timeout;
            return KeepaliveAction::SendPing;
        }
        if self.retries < self.max_retries {
            self.retries += 1;
            info!("Resending ping {}/{}", self.retries, self.max_retries);
            self.deadline = now + self.timeout;
            return KeepaliveAction::SendPing;
        }
        KeepaliveAction::GiveUp
    }
}

#[cfg(test)]
#[path = "keepalive_tests.rs"]
mod tests;
