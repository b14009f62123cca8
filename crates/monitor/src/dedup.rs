// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Duplicate detection for clipboard change events.

use clipmon_core::Snapshot;

/// True when `data` carries nothing new compared to the last forwarded
/// snapshot, so the change must not be sent out again.
///
/// Metadata formats are ignored on both sides. A format that disappeared
/// always counts as a change. A value that became empty does not.
pub fn has_same_data(data: &Snapshot, last: &Snapshot) -> bool {
    let nothing_disappeared = last.content().all(|(format, _)| data.contains(format));
    nothing_disappeared
        && data
            .content()
            .filter(|(_, value)| !value.is_empty())
            .all(|(format, value)| last.get(format) == Some(value))
}

#[cfg(test)]
#[path = "dedup_tests.rs"]
mod tests;
