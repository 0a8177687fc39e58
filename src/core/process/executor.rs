// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process executor seam used by the git queries.
//!
//! ```text
//! Git<E: ProcessExecutor>
//!        |
//!        v
//!  run_process(program, args)                 --> ()
//!  run_process_and_capture_output(program, args) --> trimmed stdout
//!        |
//!        v
//!  ShellExecutor --> ProcessBuilder (cwd, timeout, token,
//!                    GIT_TERMINAL_PROMPT=0, GCM_INTERACTIVE=never)
//! ```

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::ProcessError;

/// Runs external programs on behalf of the git queries.
pub trait ProcessExecutor {
    /// Runs a program to completion. Output goes to the log only.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if the program cannot be started or exits
    /// with a non-zero status.
    fn run_process(
        &self,
        program: &str,
        args: &[String],
    ) -> impl Future<Output = Result<(), ProcessError>> + Send;

    /// Runs a program and returns its stdout with surrounding whitespace trimmed.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if the program cannot be started or exits
    /// with a non-zero status.
    fn run_process_and_capture_output(
        &self,
        program: &str,
        args: &[String],
    ) -> impl Future<Output = Result<String, ProcessError>> + Send;
}

/// Production executor that spawns real processes.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor {
    cwd: Option<PathBuf>,
    timeout: Option<Duration>,
    token: Option<CancellationToken>,
}

impl ShellExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every process in `dir` instead of the current directory.
    #[must_use]
    pub fn with_cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Kills processes that run longer than `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Kills in-flight processes once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    #[must_use]
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    fn builder(&self, program: &str, args: &[String]) -> Result<ProcessBuilder, ProcessError> {
        let mut builder = ProcessBuilder::which(program)?
            .name(program)
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GCM_INTERACTIVE", "never");
        if let Some(cwd) = &self.cwd {
            builder = builder.cwd(cwd);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder)
    }

    async fn execute(&self, builder: ProcessBuilder) -> Result<ProcessOutput, ProcessError> {
        let command = builder.command_line();
        let output = match &self.token {
            Some(token) => builder.run_with_cancellation(token.clone()).await?,
            None => builder.run().await?,
        };
        if output.is_interrupted() {
            return Err(ProcessError::Interrupted { command });
        }
        Ok(output)
    }
}

impl ProcessExecutor for ShellExecutor {
    async fn run_process(&self, program: &str, args: &[String]) -> Result<(), ProcessError> {
        let builder = self
            .builder(program, args)?
            .stdout_flags(StreamFlags::FORWARD_TO_LOG)
            .stderr_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING);
        self.execute(builder).await?;
        Ok(())
    }

    async fn run_process_and_capture_output(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<String, ProcessError> {
        let builder = self.builder(program, args)?.capture_output();
        let output = self.execute(builder).await?;
        Ok(output.stdout().trim().to_string())
    }
}
