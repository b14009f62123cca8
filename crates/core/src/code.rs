// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message codes carried in the fixed-width code field of every frame.
//!
//! The transport treats codes as opaque `i32`s. Two closed sets are defined
//! here: monitor protocol codes and command statuses sent back to one-shot
//! client tools.

use std::fmt;

use crate::mode::Mode;

/// Codes exchanged between a monitor and the process that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum MonitorCode {
    Ping = 1,
    Pong = 2,
    PushSettings = 3,
    ChangeClipboard = 4,
    ChangeSelection = 5,
    ClipboardChanged = 6,
    Log = 7,
}

impl MonitorCode {
    pub const ALL: [MonitorCode; 7] = [
        MonitorCode::Ping,
        MonitorCode::Pong,
        MonitorCode::PushSettings,
        MonitorCode::ChangeClipboard,
        MonitorCode::ChangeSelection,
        MonitorCode::ClipboardChanged,
        MonitorCode::Log,
    ];

    pub fn from_code(code: i32) -> Option<Self> {
        MonitorCode::ALL.into_iter().find(|c| c.code() == code)
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Mode written by a change command, `None` for every other code.
    pub fn target_mode(self) -> Option<Mode> {
        match self {
            MonitorCode::ChangeClipboard => Some(Mode::Clipboard),
            MonitorCode::ChangeSelection => Some(Mode::Selection),
            _ => None,
        }
    }

    /// Change command that writes `mode`, if the protocol has one.
    pub fn change_command(mode: Mode) -> Option<Self> {
        match mode {
            Mode::Clipboard => Some(MonitorCode::ChangeClipboard),
            Mode::Selection => Some(MonitorCode::ChangeSelection),
            Mode::FindBuffer => None,
        }
    }
}

impl From<MonitorCode> for i32 {
    fn from(code: MonitorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for MonitorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Status codes of replies to one-shot client tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CommandStatus {
    /// Command finished; payload goes to stdout.
    Finished = 0,
    /// Command failed.
    Error = 1,
    /// Bad command syntax.
    BadSyntax = 2,
    /// Exception thrown while running the command.
    Exception = 4,
    /// Intermediate output; more replies follow.
    Print = 5,
}

impl CommandStatus {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(CommandStatus::Finished),
            1 => Some(CommandStatus::Error),
            2 => Some(CommandStatus::BadSyntax),
            4 => Some(CommandStatus::Exception),
            5 => Some(CommandStatus::Print),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<CommandStatus> for i32 {
    fn from(status: CommandStatus) -> Self {
        status.code()
    }
}

/// Debug label for a raw code, e.g. `Pong` or `Unknown(42)`.
pub fn describe_code(code: i32) -> String {
    match MonitorCode::from_code(code) {
        Some(known) => known.to_string(),
        None => format!("Unknown({})", code),
    }
}

#[cfg(test)]
#[path = "code_tests.rs"]
mod tests;
