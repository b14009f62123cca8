// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client role for short-lived tools.
//!
//! A client opens an endpoint to a well-known name and either performs a
//! blocking request/response exchange or consumes the endpoint's events.
//! `Disconnected` is a normal end; `ConnectFailed` is a failure.

use std::io::Write;

use clipmon_core::{describe_code, CommandStatus};
use clipmon_wire::Message;
use thiserror::Error;
use tracing::{debug, error};

use crate::endpoint::{ConnectionState, Endpoint, EndpointEvent};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Cannot connect to server {name:?}! Start the server first.")]
    ConnectFailed { name: String },

    #[error("Connection closed before a reply arrived")]
    Disconnected,

    #[error("Cannot write output: {0}")]
    Output(#[from] std::io::Error),
}

impl ClientError {
    /// Process exit status for this error. A disconnect is a normal end.
    pub fn exit_code(&self) -> i32 {
        match self {
            ClientError::Disconnected => 0,
            ClientError::ConnectFailed { .. } | ClientError::Output(_) => 1,
        }
    }
}

/// Exit status a tool should use when its endpoint emits a terminal event.
pub fn exit_code_for(event: &EndpointEvent) -> Option<i32> {
    match event {
        EndpointEvent::MessageArrived(_) => None,
        EndpointEvent::Disconnected => Some(0),
        EndpointEvent::ConnectFailed => Some(1),
    }
}

/// What a one-shot tool does with one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Intermediate output for stdout; more replies follow.
    Print(Vec<u8>),
    /// Final reply: write the payload and exit with `exit_code`.
    Finish {
        exit_code: i32,
        payload: Vec<u8>,
        to_stderr: bool,
    },
    /// Status this build does not know; keep waiting.
    Unhandled(i32),
}

impl Reply {
    pub fn classify(message: Message) -> Self {
        match CommandStatus::from_code(message.code) {
            Some(CommandStatus::Finished) => Reply::Finish {
                exit_code: 0,
                payload: message.payload,
                to_stderr: false,
            },
            Some(
                status @ (CommandStatus::Error
                | CommandStatus::BadSyntax
                | CommandStatus::Exception),
            ) => Reply::Finish {
                exit_code: status.code(),
                payload: message.payload,
                to_stderr: true,
            },
            Some(CommandStatus::Print) => Reply::Print(message.payload),
            None => Reply::Unhandled(message.code),
        }
    }
}

#[derive(Debug)]
pub struct Client {
    name: String,
    endpoint: Endpoint,
}

impl Client {
    pub async fn connect(name: &str) -> Result<Self, ClientError> {
        let endpoint = Endpoint::open(name).await;
        Self::with_endpoint(name, endpoint)
    }

    /// Wrap an endpoint that is already open.
    pub fn with_endpoint(name: &str, endpoint: Endpoint) -> Result<Self, ClientError> {
        if endpoint.state() == ConnectionState::Failed {
            return Err(ClientError::ConnectFailed {
                name: name.to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            endpoint,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn send(&mut self, message: &Message) {
        self.endpoint.send(message).await;
    }

    /// Block until the next message arrives.
    pub async fn await_reply(&mut self) -> Result<Message, ClientError> {
        self.endpoint.wait_for_data().await;
        match self.endpoint.next_event().await {
            Some(EndpointEvent::MessageArrived(message)) => {
                let code = describe_code(message.code);
                debug!(conn = %self.endpoint.id(), "Reply received: {}", code);
                Ok(message)
            }
            Some(EndpointEvent::ConnectFailed) => Err(ClientError::ConnectFailed {
                name: self.name.clone(),
            }),
            Some(EndpointEvent::Disconnected) | None => Err(ClientError::Disconnected),
        }
    }

    /// Send `message` and wait for one reply.
    pub async fn request(&mut self, message: &Message) -> Result<Message, ClientError> {
        self.send(message).await;
        self.await_reply().await
    }

    /// Send a command and relay its replies until a final status arrives.
    ///
    /// Returns the exit status carried by the final reply. The payload goes
    /// to `stdout` on success and to `stderr` otherwise. A disconnect before
    /// the final reply ends the command normally.
    pub async fn run_command<O, E>(
        &mut self,
        command: &Message,
        stdout: &mut O,
        stderr: &mut E,
    ) -> Result<i32, ClientError>
    where
        O: Write,
        E: Write,
    {
        self.send(command).await;
        loop {
            let message = match self.await_reply().await {
                Ok(message) => message,
                Err(ClientError::Disconnected) => return Ok(0),
                Err(e) => return Err(e),
            };
            match Reply::classify(message) {
                Reply::Print(payload) => {
                    stdout.write_all(&payload)?;
                    stdout.flush()?;
                }
                Reply::Finish {
                    exit_code,
                    payload,
                    to_stderr: false,
                } => {
                    stdout.write_all(&payload)?;
                    stdout.flush()?;
                    return Ok(exit_code);
                }
                Reply::Finish {
                    exit_code,
                    payload,
                    to_stderr: true,
                } => {
                    if !payload.is_empty() {
                        stderr.write_all(&payload)?;
                        if !payload.ends_with(b"\n") {
                            stderr.write_all(b"\n")?;
                        }
                    }
                    stderr.flush()?;
                    return Ok(exit_code);
                }
                Reply::Unhandled(code) => {
                    error!("Unhandled message: {}", describe_code(code));
                }
            }
        }
    }

    /// Next endpoint event, for streaming consumers.
    pub async fn next_event(&mut self) -> Option<EndpointEvent> {
        self.endpoint.next_event().await
    }

    pub fn close(&mut self) {
        self.endpoint.close();
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
