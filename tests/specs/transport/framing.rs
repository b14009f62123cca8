// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Framing specs
//!
//! Raw bytes on the monitor socket, in arbitrary chunks.

use clipmon_wire::{encode_frame, read_message, ProtocolError};
use tokio::io::AsyncWriteExt;

use crate::prelude::*;

#[tokio::test]
async fn ping_written_one_byte_at_a_time_gets_pong() {
    let session = Session::start();
    let mut stream = session.raw().await;

    // length 5, code 1 (Ping), payload "A"
    for byte in [0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x01, b'A'] {
        stream.write_all(&[byte]).await.unwrap();
        stream.flush().await.unwrap();
        tokio::task::yield_now().await;
    }

    let reply = tokio::time::timeout(WAIT, read_message(&mut stream))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reply, Message::empty(MonitorCode::Pong));

    drop(stream);
    assert_eq!(session.exit().await, MonitorExit::Disconnected);
}

#[tokio::test]
async fn burst_of_requests_is_answered_in_order() {
    let session = Session::start();
    let mut stream = session.raw().await;

    let mut burst = Vec::new();
    for _ in 0..3 {
        burst.extend(encode_frame(&Message::empty(MonitorCode::Ping)).unwrap());
    }
    // Unknown code in the middle is skipped without a reply
    burst.extend(encode_frame(&Message::new(99, b"?".to_vec())).unwrap());
    burst.extend(encode_frame(&Message::empty(MonitorCode::Ping)).unwrap());
    stream.write_all(&burst).await.unwrap();

    for _ in 0..4 {
        let reply = tokio::time::timeout(WAIT, read_message(&mut stream))
            .await
            .unwrap()
            .unwrap();
        assert!(reply.is(MonitorCode::Pong));
    }
}

#[tokio::test]
async fn oversized_length_prefix_drops_connection() {
    let session = Session::start();
    let mut stream = session.raw().await;

    stream
        .write_all(&[0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01])
        .await
        .unwrap();

    assert_eq!(session.exit().await, MonitorExit::Disconnected);
    let err = read_message(&mut stream).await.unwrap_err();
    assert!(
        matches!(err, ProtocolError::ConnectionClosed | ProtocolError::Io(_)),
        "{err}"
    );
}

#[tokio::test]
async fn length_too_short_for_code_drops_connection() {
    let session = Session::start();
    let mut stream = session.raw().await;

    stream
        .write_all(&[0x00, 0x00, 0x00, 0x02, 0xaa, 0xbb])
        .await
        .unwrap();
    assert_eq!(session.exit().await, MonitorExit::Disconnected);
}

#[tokio::test]
async fn close_mid_message_stops_monitor_without_side_effects() {
    let session = Session::start();
    let mut stream = session.raw().await;

    let frame = encode_frame(&change_message(Mode::Clipboard, &Snapshot::text("never"))).unwrap();
    stream.write_all(&frame[..frame.len() - 2]).await.unwrap();
    drop(stream);

    let clipboard = session.clipboard.clone();
    assert_eq!(session.exit().await, MonitorExit::Disconnected);
    assert!(clipboard.contents(Mode::Clipboard).is_empty());
}
