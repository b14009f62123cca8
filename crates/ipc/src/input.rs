// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background reading of a blocking input source.
//!
//! One-shot tools read stdin while they connect and talk to the server. The
//! read runs on its own thread and hands its result back exactly once.

use std::io::{self, Read};
use std::thread::JoinHandle;

use tokio::sync::oneshot;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct InputReader {
    thread: Option<JoinHandle<()>>,
    result: oneshot::Receiver<io::Result<Vec<u8>>>,
}

impl InputReader {
    /// Start reading `source` to EOF on a dedicated thread.
    pub fn spawn<R>(mut source: R) -> io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let thread = std::thread::Builder::new()
            .name("input-reader".to_string())
            .spawn(move || {
                let mut input = Vec::new();
                let result = source.read_to_end(&mut input).map(|_| input);
                let _ = tx.send(result);
            })?;
        Ok(Self {
            thread: Some(thread),
            result: rx,
        })
    }

    pub fn stdin() -> io::Result<Self> {
        Self::spawn(io::stdin())
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the input and join the reader thread.
    pub async fn input(mut self) -> io::Result<Vec<u8>> {
        let stopped = || io::Error::other("input reader stopped without a result");
        let result = (&mut self.result).await.map_err(|_| stopped())?;
        self.join();
        result
    }

    /// Stop waiting for input. A finished reader is joined; one still
    /// blocked on its source is left to end with the process.
    pub fn abort(mut self) {
        self.join();
    }

    fn join(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        if thread.is_finished() {
            if thread.join().is_err() {
                warn!("Input reader panicked");
            }
        } else {
            debug!("Detaching unfinished input reader");
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.join();
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
