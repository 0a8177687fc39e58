// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for chart-git using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! chart-git [global options] <command>
//! version | options | configs | validate
//! exists <commit> <file>
//! show <commit> <file>
//! merge-base <a> <b>
//! diff <commit> [dirs..] [--json]
//! remote-url [remote]
//! worktree {add <path> <ref> | remove <path>}
//! changed [--since REF] [--json]
//! ```

pub mod git;
pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::git::{
    ChangedArgs, DiffArgs, ExistsArgs, MergeBaseArgs, RemoteUrlArgs, ShowArgs, WorktreeArgs,
};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Git query adapter for chart repositories.
#[derive(Debug, Parser)]
#[command(
    name = "chart-git",
    author,
    version,
    about = "Git query adapter for chart repositories",
    long_about = "chart-git Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Answers repository questions for chart tooling by running the\n\
                  git CLI: file existence at a commit, file contents, merge bases,\n\
                  changed files, remote URLs and linked worktrees.",
    after_help = "CONFIG FILES:\n\n\
                  chart-git reads `chart-git.toml` from the current directory if it\n\
                  exists, then every file given with --config in order. CHART_GIT_*\n\
                  environment variables (e.g. CHART_GIT_GIT__TARGET_BRANCH=master)\n\
                  override the files, and --set overrides everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files that were loaded.
    Configs,

    /// Checks that the repository directory is inside a git work tree.
    Validate,

    /// Checks whether a file exists at a commit.
    Exists(ExistsArgs),

    /// Prints a file as of a commit.
    Show(ShowArgs),

    /// Prints the merge base of two commits.
    #[command(name = "merge-base")]
    MergeBase(MergeBaseArgs),

    /// Lists files changed since a commit.
    Diff(DiffArgs),

    /// Prints the URL of a remote.
    #[command(name = "remote-url")]
    RemoteUrl(RemoteUrlArgs),

    /// Adds or removes linked worktrees.
    Worktree(WorktreeArgs),

    /// Lists chart directories changed since the target branch.
    Changed(ChangedArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
