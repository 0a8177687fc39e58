// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .env() .capture_stdout() .timeout()
//!   .run() / .run_with_cancellation()
//!       --> tokio::process::Command
//!           drain stdout/stderr concurrently
//!       --> ProcessOutput { exit_code, stdout, stderr }
//!
//! ProcessExecutor (trait) <-- ShellExecutor (production)
//! ```

pub mod builder;
pub mod executor;
mod io;
mod runner;
#[cfg(test)]
mod tests;
