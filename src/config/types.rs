// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for chart-git.
//!
//! ```text
//! Config: GlobalConfig, GitConfig
//! GitConfig: program, remote, target_branch, since,
//!            chart_dirs, excluded_charts, timeout_secs
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::git::tool::DEFAULT_GIT_PROGRAM;
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log worktree mutations instead of running them.
    pub dry: bool,
    /// Log level for console output (0-5).
    pub log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Write the log file as JSON lines.
    pub json_log: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            json_log: false,
        }
    }
}

/// Repository settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Git executable name or path.
    pub program: String,
    /// Remote that hosts the target branch.
    pub remote: String,
    /// Branch that changes are compared against.
    pub target_branch: String,
    /// Explicit comparison ref; overrides `<remote>/<target_branch>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// Directories containing charts, relative to the repository root.
    pub chart_dirs: Vec<String>,
    /// Chart names or directories to skip (glob patterns).
    pub excluded_charts: Vec<String>,
    /// Per-process timeout in seconds (0 = none).
    pub timeout_secs: u64,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_GIT_PROGRAM.to_string(),
            remote: "origin".to_string(),
            target_branch: "main".to_string(),
            since: None,
            chart_dirs: vec!["charts".to_string()],
            excluded_charts: Vec::new(),
            timeout_secs: 0,
        }
    }
}

impl GitConfig {
    /// Ref that changes are computed against.
    #[must_use]
    pub fn since_ref(&self) -> String {
        self.since
            .clone()
            .unwrap_or_else(|| format!("{}/{}", self.remote, self.target_branch))
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}
