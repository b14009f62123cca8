// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client role specs: request/response and command replies.

use clipmon_core::CommandStatus;
use clipmon_ipc::{exit_code_for, listener};
use tempfile::TempDir;

use crate::prelude::*;

/// A server endpoint driven by the test itself.
struct Scripted {
    _dir: TempDir,
    server: Endpoint,
    client: Client,
}

async fn scripted() -> Scripted {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("host.sock");
    let listener = listener::bind_path(&path).unwrap();
    let accepted = tokio::spawn(async move { listener::accept(&listener).await.unwrap() });
    let client = Client::with_endpoint("host", Endpoint::open_path(&path, WAIT).await).unwrap();
    let server = accepted.await.unwrap();
    Scripted {
        _dir: dir,
        server,
        client,
    }
}

#[tokio::test]
async fn request_gets_pong_from_monitor() {
    let session = Session::start();
    let mut client = session.client().await;

    let reply = client
        .request(&Message::empty(MonitorCode::Ping))
        .await
        .unwrap();
    assert_eq!(reply, Message::empty(MonitorCode::Pong));
}

#[tokio::test]
async fn server_hangup_is_a_normal_end() {
    let Scripted {
        _dir,
        server,
        mut client,
    } = scripted().await;
    drop(server);

    let err = client.await_reply().await.unwrap_err();
    assert!(matches!(err, ClientError::Disconnected));
    assert_eq!(err.exit_code(), 0);
    assert_eq!(client.next_event().await, None);
}

#[tokio::test]
async fn terminal_event_maps_to_exit_status() {
    let Scripted {
        _dir,
        mut server,
        mut client,
    } = scripted().await;
    client.close();

    let event = server.next_event().await.unwrap();
    assert_eq!(event, EndpointEvent::Disconnected);
    assert_eq!(exit_code_for(&event), Some(0));
}

#[tokio::test]
async fn command_output_goes_to_stdout_on_success() {
    let Scripted {
        _dir,
        mut server,
        mut client,
    } = scripted().await;

    let host = tokio::spawn(async move {
        let Some(EndpointEvent::MessageArrived(command)) = server.next_event().await else {
            panic!("expected a command");
        };
        server
            .send(&Message::new(CommandStatus::Print, b"line 1\n".to_vec()))
            .await;
        server.send(&Message::new(4242, b"ignored".to_vec())).await;
        server
            .send(&Message::new(CommandStatus::Finished, command.payload))
            .await;
        server
    });

    let (mut stdout, mut stderr) = (Vec::new(), Vec::new());
    let command = Message::new(10, b"line 2".to_vec());
    let status = client
        .run_command(&command, &mut stdout, &mut stderr)
        .await
        .unwrap();

    assert_eq!(status, 0);
    assert_eq!(stdout, b"line 1\nline 2");
    assert!(stderr.is_empty());
    drop(host.await.unwrap());
}

#[tokio::test]
async fn command_failure_goes_to_stderr_with_status() {
    let Scripted {
        _dir,
        mut server,
        mut client,
    } = scripted().await;

    let host = tokio::spawn(async move {
        server.next_event().await;
        server
            .send(&Message::new(CommandStatus::Exception, b"boom".to_vec()))
            .await;
        server
    });

    let (mut stdout, mut stderr) = (Vec::new(), Vec::new());
    let status = client
        .run_command(&Message::empty(10), &mut stdout, &mut stderr)
        .await
        .unwrap();

    assert_eq!(status, 4);
    assert!(stdout.is_empty());
    assert_eq!(stderr, b"boom\n");
    drop(host.await.unwrap());
}

#[tokio::test]
async fn command_cut_short_by_hangup_succeeds() {
    let Scripted {
        _dir,
        mut server,
        mut client,
    } = scripted().await;

    let host = tokio::spawn(async move {
        server.next_event().await;
        server
            .send(&Message::new(CommandStatus::Print, b"partial".to_vec()))
            .await;
    });

    let (mut stdout, mut stderr) = (Vec::new(), Vec::new());
    let status = client
        .run_command(&Message::empty(10), &mut stdout, &mut stderr)
        .await
        .unwrap();
    host.await.unwrap();

    assert_eq!(status, 0);
    assert_eq!(stdout, b"partial");
}
