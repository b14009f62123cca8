// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clipboard writes waiting for the next idle point.

use std::collections::BTreeMap;

use clipmon_core::{Mode, Snapshot};

/// Coalescing write set plus a single "flush scheduled" flag.
///
/// Writes for the same mode replace each other until the set is drained.
#[derive(Debug, Default)]
pub struct PendingWrites {
    writes: BTreeMap<Mode, Snapshot>,
    scheduled: bool,
}

impl PendingWrites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a write and schedule a flush. Returns true if this call
    /// scheduled it, false if a flush was already pending.
    pub fn insert(&mut self, mode: Mode, data: Snapshot) -> bool {
        self.writes.insert(mode, data);
        !std::mem::replace(&mut self.scheduled, true)
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn get(&self, mode: Mode) -> Option<&Snapshot> {
        self.writes.get(&mode)
    }

    /// Take every pending write, in mode order, and clear the schedule flag.
    pub fn drain(&mut self) -> Vec<(Mode, Snapshot)> {
        self.scheduled = false;
        std::mem::take(&mut self.writes).into_iter().collect()
    }
}

#[cfg(test)]
#[path = "pending_tests.rs"]
mod tests;
