// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child(child, token)
//!   stdout/stderr reader tasks (drain concurrently)
//!   wait | timeout | cancel
//!   join readers
//!   --> ProcessOutput { exit_code, stdout, stderr, interrupted, timed_out }
//! ```

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::ProcessError;

/// How the wait on a child ended.
enum Exit {
    Finished(std::process::ExitStatus),
    TimedOut(std::process::ExitStatus),
    Cancelled(std::process::ExitStatus),
}

/// Spawns a reader task for one stream if its flags need the data.
fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    if !flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING) {
        return None;
    }
    let name = process_name.to_string();
    stream.map(|stream| {
        tokio::spawn(async move { read_stream(stream, flags, &name, stream_name).await })
    })
}

async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

/// Reads a stream to EOF as raw bytes, logging and/or keeping each line.
///
/// Kept output is byte-for-byte what the child wrote (including `\r\n`),
/// decoded as lossy UTF-8 once the stream ends. The pipe is always drained so
/// the child never blocks on a full pipe.
async fn read_stream<R>(reader: R, flags: StreamFlags, process_name: &str, stream_name: &str) -> String
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    let mut kept = Vec::new();

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    let text = String::from_utf8_lossy(&line);
                    let text = text.trim_end_matches(['\n', '\r']);
                    trace!(process = %process_name, stream = %stream_name, line = %text, "output");
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    kept.extend_from_slice(&line);
                }
            }
            Err(e) => {
                warn!(
                    process = %process_name,
                    stream = %stream_name,
                    error = %e,
                    "error reading stream"
                );
                break;
            }
        }
    }

    String::from_utf8_lossy(&kept).into_owned()
}

impl ProcessBuilder {
    /// Runs the child process, draining its output until it exits, times out,
    /// or the token is cancelled.
    pub(super) async fn run_child(
        &self,
        name: &str,
        command_line: &str,
        child: &mut Child,
        token: &CancellationToken,
    ) -> Result<ProcessOutput, ProcessError> {
        let stdout_handle = spawn_reader(child.stdout.take(), self.stdout_stream(), name, "stdout");
        let stderr_handle = spawn_reader(child.stderr.take(), self.stderr_stream(), name, "stderr");

        let wait_error = |e: std::io::Error| ProcessError::OutputError {
            command: command_line.to_string(),
            message: e.to_string(),
        };

        // A missing timeout never fires.
        let timeout = self.timeout_duration().unwrap_or(Duration::MAX);

        let exit = tokio::select! {
            status = child.wait() => Exit::Finished(status.map_err(wait_error)?),
            () = tokio::time::sleep(timeout) => {
                warn!(process = %name, timeout = ?timeout, "process timed out");
                child.kill().await.map_err(wait_error)?;
                Exit::TimedOut(child.wait().await.map_err(wait_error)?)
            }
            () = token.cancelled() => {
                warn!(process = %name, "cancellation requested, terminating process");
                child.kill().await.map_err(wait_error)?;
                Exit::Cancelled(child.wait().await.map_err(wait_error)?)
            }
        };

        let stdout = join_reader(stdout_handle).await;
        let stderr = join_reader(stderr_handle).await;

        Ok(match exit {
            Exit::Finished(status) => {
                ProcessOutput::new(status.code().unwrap_or(-1), stdout, stderr)
            }
            Exit::TimedOut(status) => {
                ProcessOutput::new(status.code().unwrap_or(-1), stdout, stderr).mark_timed_out()
            }
            Exit::Cancelled(status) => {
                ProcessOutput::new(status.code().unwrap_or(-1), stdout, stderr).mark_interrupted()
            }
        })
    }
}
