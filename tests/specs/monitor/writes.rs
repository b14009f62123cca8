// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ChangeClipboard / ChangeSelection specs

use clipmon_wire::{encode_frame, read_message};
use tokio::io::AsyncWriteExt;
use tokio::net::UnixStream;

use crate::prelude::*;

async fn round_trip(stream: &mut UnixStream) {
    stream
        .write_all(&encode_frame(&Message::empty(MonitorCode::Ping)).unwrap())
        .await
        .unwrap();
    let reply = tokio::time::timeout(WAIT, read_message(stream))
        .await
        .unwrap()
        .unwrap();
    assert!(reply.is(MonitorCode::Pong));
}

#[tokio::test]
async fn change_command_sets_clipboard() {
    let session = Session::start();
    let mut client = session.client().await;

    client
        .send(&change_message(Mode::Clipboard, &Snapshot::text("X")))
        .await;
    client
        .send(&change_message(Mode::Selection, &Snapshot::text("S")))
        .await;
    sync(&mut client).await;
    sync(&mut client).await;

    assert_eq!(
        session.clipboard.contents(Mode::Clipboard),
        Snapshot::text("X")
    );
    assert_eq!(
        session.clipboard.contents(Mode::Selection),
        Snapshot::text("S")
    );
}

#[tokio::test]
async fn own_write_is_not_echoed() {
    let session = Session::start();
    let mut client = session.client().await;

    client.send(&settings_message(&Settings::default())).await;
    client
        .send(&change_message(Mode::Clipboard, &Snapshot::text("X")))
        .await;
    sync(&mut client).await;
    sync(&mut client).await;

    // The echo of X is queued ahead of this change
    session
        .clipboard
        .external_change(Mode::Clipboard, Snapshot::text("Y"));
    let changed = next_message(&mut client).await;
    assert!(changed.is(MonitorCode::ClipboardChanged));
    assert_eq!(
        decode_snapshot(&changed.payload).unwrap(),
        Snapshot::text("Y")
    );
}

#[tokio::test]
async fn writes_in_one_burst_are_coalesced() {
    let session = Session::start();
    let mut observer = session.clipboard.clone();
    let mut applied = observer.subscribe();
    let mut stream = session.raw().await;

    let mut burst = Vec::new();
    for text in ["first", "second", "third"] {
        let message = change_message(Mode::Clipboard, &Snapshot::text(text));
        burst.extend(encode_frame(&message).unwrap());
    }
    burst.extend(encode_frame(&Message::empty(MonitorCode::Ping)).unwrap());
    stream.write_all(&burst).await.unwrap();

    let reply = tokio::time::timeout(WAIT, read_message(&mut stream))
        .await
        .unwrap()
        .unwrap();
    assert!(reply.is(MonitorCode::Pong));
    // A second round trip starts a new burst, after the first one flushed
    round_trip(&mut stream).await;

    assert_eq!(
        session.clipboard.contents(Mode::Clipboard),
        Snapshot::text("third")
    );
    assert_eq!(applied.try_recv().ok(), Some(Mode::Clipboard));
    assert!(applied.try_recv().is_err());
}

#[tokio::test]
async fn write_is_applied_before_monitor_exits() {
    let session = Session::start();
    let mut stream = session.raw().await;

    let frame = encode_frame(&change_message(Mode::Selection, &Snapshot::text("bye"))).unwrap();
    stream.write_all(&frame).await.unwrap();
    drop(stream);

    let clipboard = session.clipboard.clone();
    assert_eq!(session.exit().await, MonitorExit::Disconnected);
    assert_eq!(clipboard.contents(Mode::Selection), Snapshot::text("bye"));
}

#[tokio::test]
async fn malformed_write_is_skipped() {
    let session = Session::start();
    let mut client = session.client().await;

    client
        .send(&Message::new(MonitorCode::ChangeClipboard, vec![0, 0, 0, 1, 0, 0]))
        .await;
    sync(&mut client).await;
    sync(&mut client).await;

    assert!(session.clipboard.contents(Mode::Clipboard).is_empty());
}
