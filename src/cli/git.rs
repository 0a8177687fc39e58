// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository query command arguments.
//!
//! # Subcommands
//!
//! ```text
//! exists COMMIT FILE          → true/false, exit 1 when absent
//! show COMMIT FILE            → file contents
//! merge-base A B              → commit id
//! diff COMMIT [DIRS..]        → changed files (one per line or JSON)
//! remote-url [REMOTE]         → fetch url
//! worktree add PATH REF
//! worktree remove PATH
//! changed [--since REF]       → changed chart dirs
//! ```

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments for the `exists` command.
#[derive(Debug, Clone, Args)]
pub struct ExistsArgs {
    /// Commit, branch or tag to look in.
    pub commit: String,

    /// Path of the file relative to the repository root.
    pub file: String,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Commit, branch or tag to read from.
    pub commit: String,

    /// Path of the file relative to the repository root.
    pub file: String,
}

/// Arguments for the `merge-base` command.
#[derive(Debug, Clone, Args)]
pub struct MergeBaseArgs {
    /// First commit.
    pub left: String,

    /// Second commit.
    pub right: String,
}

/// Arguments for the `diff` command.
#[derive(Debug, Clone, Args)]
pub struct DiffArgs {
    /// Commit to compare the work tree against.
    pub commit: String,

    /// Directories to limit the diff to.
    /// Defaults to the configured chart directories.
    #[arg(value_name = "DIR")]
    pub dirs: Vec<String>,

    /// Prints the file list as a JSON array.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `remote-url` command.
#[derive(Debug, Clone, Args)]
pub struct RemoteUrlArgs {
    /// Remote name. Defaults to the configured remote.
    pub remote: Option<String>,
}

/// Arguments for the `worktree` command.
#[derive(Debug, Clone, Args)]
pub struct WorktreeArgs {
    /// Worktree subcommand.
    #[command(subcommand)]
    pub subcommand: WorktreeSubcommand,
}

/// Worktree subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum WorktreeSubcommand {
    /// Adds a linked worktree checked out at a ref.
    Add {
        /// Directory for the new worktree.
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Commit, branch or tag to check out.
        #[arg(value_name = "REF")]
        git_ref: String,
    },

    /// Removes a linked worktree.
    Remove {
        /// Directory of the worktree.
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

/// Arguments for the `changed` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ChangedArgs {
    /// Compares against this ref instead of <remote>/<target_branch>.
    #[arg(long, value_name = "REF")]
    pub since: Option<String>,

    /// Prints the chart list as a JSON array.
    #[arg(long)]
    pub json: bool,
}
