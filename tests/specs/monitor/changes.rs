// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ClipboardChanged specs
//!
//! Clipboard change events are delivered in order, so a later change that
//! does get forwarded proves an earlier one was suppressed.

use clipmon_core::{MIME_CLIPBOARD_MODE, MIME_WINDOW_TITLE};
use similar_asserts::assert_eq;

use crate::prelude::*;

async fn watching(session: &Session) -> Client {
    let mut client = session.client().await;
    client.send(&settings_message(&Settings::default())).await;
    sync(&mut client).await;
    client
}

async fn next_change(client: &mut Client) -> Snapshot {
    let message = next_message(client).await;
    assert!(
        message.is(MonitorCode::ClipboardChanged),
        "unexpected code {}",
        message.code
    );
    decode_snapshot(&message.payload).unwrap()
}

#[tokio::test]
async fn external_change_is_forwarded_with_window_title() {
    let session = Session::start();
    let mut client = watching(&session).await;
    session.clipboard.set_window_title(Some("Editor"));

    session
        .clipboard
        .external_change(Mode::Clipboard, Snapshot::text("hello"));

    let mut expected = Snapshot::text("hello");
    expected.insert(MIME_WINDOW_TITLE, "Editor");
    assert_eq!(next_change(&mut client).await, expected);
}

#[tokio::test]
async fn selection_change_carries_mode_tag() {
    let session = Session::start();
    let mut client = watching(&session).await;

    session
        .clipboard
        .external_change(Mode::Selection, Snapshot::text("sel"));

    let data = next_change(&mut client).await;
    assert_eq!(data.get(MIME_CLIPBOARD_MODE), Some(&b"selection"[..]));
    assert!(!data.contains(MIME_WINDOW_TITLE));
}

#[tokio::test]
async fn metadata_only_change_is_suppressed() {
    let session = Session::start();
    let mut client = watching(&session).await;

    session
        .clipboard
        .external_change(Mode::Clipboard, Snapshot::text("hello"));
    assert_eq!(next_change(&mut client).await, Snapshot::text("hello"));

    let mut annotated = Snapshot::text("hello");
    annotated.insert("application/x-copyq-note", "n");
    session
        .clipboard
        .external_change(Mode::Clipboard, annotated);
    session
        .clipboard
        .external_change(Mode::Clipboard, Snapshot::text("next"));

    assert_eq!(next_change(&mut client).await, Snapshot::text("next"));
}

#[tokio::test]
async fn identical_change_is_suppressed() {
    let session = Session::start();
    let mut client = watching(&session).await;

    session
        .clipboard
        .external_change(Mode::Clipboard, Snapshot::text("same"));
    session
        .clipboard
        .external_change(Mode::Clipboard, Snapshot::text("same"));
    session
        .clipboard
        .external_change(Mode::Clipboard, Snapshot::text("other"));

    assert_eq!(next_change(&mut client).await, Snapshot::text("same"));
    assert_eq!(next_change(&mut client).await, Snapshot::text("other"));
}

#[tokio::test]
async fn removed_format_is_forwarded() {
    let session = Session::start();
    let mut client = watching(&session).await;

    let rich: Snapshot = [(MIME_TEXT, "x"), ("text/html", "<i>x</i>")].into_iter().collect();
    session
        .clipboard
        .external_change(Mode::Clipboard, rich.clone());
    assert_eq!(next_change(&mut client).await, rich);

    session
        .clipboard
        .external_change(Mode::Clipboard, Snapshot::text("x"));
    assert_eq!(next_change(&mut client).await, Snapshot::text("x"));
}

#[tokio::test]
async fn changes_before_settings_are_not_observed() {
    let session = Session::start();
    let mut client = session.client().await;

    session
        .clipboard
        .external_change(Mode::Clipboard, Snapshot::text("early"));
    assert!(sync(&mut client).await.is_empty());
    assert_eq!(session.clipboard.subscriptions(), 0);
}
