// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!         ChartGitError (~16 bytes)
//!                 |
//!        +--------+--------+
//!        |        |        |
//!        v        v        v
//!       Git    Process   Config
//!       Box      Box      Box
//!
//! Sub-errors (unboxed internally):
//!   Git      NotARepository, Diff, AddWorktree, RemoveWorktree,
//!            Show, MergeBase, RemoteUrl
//!   Process  ExecutableNotFound, SpawnFailed, NonZeroExit,
//!            Timeout, Interrupted, OutputError
//!   Config   ParseError, InvalidValue
//! ```
//!
//! Each layer's message embeds the layer below, so `Display` alone carries
//! the whole story, and no variant exposes a `source()` that would repeat it.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ChartGitError`].
pub type ChartGitResult<T> = std::result::Result<T, ChartGitError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum ChartGitError {
    /// Git query failed.
    #[error("git error: {0}")]
    Git(Box<GitError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(Box<ProcessError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(Box<ConfigError>),
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ChartGitError {
                fn from(err: $error) -> Self {
                    ChartGitError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ProcessError => Process,
    ConfigError => Config,
}

// --- Git Errors ---

/// Errors from the repository queries.
///
/// Each variant keeps the [`ProcessError`] of the failed `git` invocation,
/// so exit status and stderr stay available to callers. The process error is
/// part of the message, not a `source()`.
#[derive(Debug, Error)]
pub enum GitError {
    /// Working directory is not inside a git work tree.
    #[error("not inside a git work tree: {0}")]
    NotARepository(ProcessError),

    /// `git diff` failed.
    #[error("failed creating diff: {0}")]
    Diff(ProcessError),

    /// `git worktree add` failed.
    #[error("failed to add worktree at {path}: {cause}")]
    AddWorktree {
        path: String,
        cause: ProcessError,
    },

    /// `git worktree remove` failed.
    #[error("failed to remove worktree at {path}: {cause}")]
    RemoveWorktree {
        path: String,
        cause: ProcessError,
    },

    /// `git show` failed.
    #[error("failed to show {spec}: {cause}")]
    Show {
        spec: String,
        cause: ProcessError,
    },

    /// `git merge-base` failed.
    #[error("failed to find merge base of {left} and {right}: {cause}")]
    MergeBase {
        left: String,
        right: String,
        cause: ProcessError,
    },

    /// `git ls-remote --get-url` failed.
    #[error("failed to get url for remote {remote}: {cause}")]
    RemoteUrl {
        remote: String,
        cause: ProcessError,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration source.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {cause}")]
    SpawnFailed {
        command: String,
        cause: std::io::Error,
    },

    /// Process exited with a code outside its success set.
    #[error("process '{command}' exited with code {code}{}", stderr_suffix(.stderr))]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Process was cancelled before it finished.
    #[error("process '{command}' was interrupted")]
    Interrupted { command: String },

    /// Failed to wait on the process or read its output.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

impl ProcessError {
    /// Exit code of the failed process, if it ran to completion.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Captured stderr of the failed process, if any.
    #[must_use]
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::NonZeroExit { stderr, .. } if !stderr.is_empty() => Some(stderr),
            _ => None,
        }
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
