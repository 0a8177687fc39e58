// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use chart_git::cli::git::WorktreeSubcommand;
use chart_git::cli::{Cli, Command};
use clap::Parser;
use std::path::PathBuf;

// =============================================================================
// Simple commands
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["chart-git", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["chart-git"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn cli_options_and_configs() {
    let cli = Cli::try_parse_from(["chart-git", "options"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Options)));
    let cli = Cli::try_parse_from(["chart-git", "configs"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Configs)));
}

#[test]
fn cli_unknown_command() {
    assert!(Cli::try_parse_from(["chart-git", "frobnicate"]).is_err());
}

// =============================================================================
// Query commands
// =============================================================================

#[test]
fn cli_exists() {
    let cli =
        Cli::try_parse_from(["chart-git", "exists", "main", "charts/app/Chart.yaml"]).unwrap();
    let Some(Command::Exists(args)) = cli.command else {
        panic!("expected exists");
    };
    assert_eq!(args.commit, "main");
    assert_eq!(args.file, "charts/app/Chart.yaml");
}

#[test]
fn cli_show_requires_file() {
    assert!(Cli::try_parse_from(["chart-git", "show", "HEAD"]).is_err());
    let cli = Cli::try_parse_from(["chart-git", "show", "HEAD", "README.md"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Show(_))));
}

#[test]
fn cli_merge_base() {
    let cli = Cli::try_parse_from(["chart-git", "merge-base", "origin/main", "HEAD"]).unwrap();
    let Some(Command::MergeBase(args)) = cli.command else {
        panic!("expected merge-base");
    };
    assert_eq!((args.left.as_str(), args.right.as_str()), ("origin/main", "HEAD"));
}

#[test]
fn cli_diff_without_dirs() {
    let cli = Cli::try_parse_from(["chart-git", "diff", "HEAD~1"]).unwrap();
    let Some(Command::Diff(args)) = cli.command else {
        panic!("expected diff");
    };
    assert!(args.dirs.is_empty());
    assert!(!args.json);
}

#[test]
fn cli_remote_url_with_name() {
    let cli = Cli::try_parse_from(["chart-git", "remote-url", "upstream"]).unwrap();
    let Some(Command::RemoteUrl(args)) = cli.command else {
        panic!("expected remote-url");
    };
    assert_eq!(args.remote.as_deref(), Some("upstream"));
}

#[test]
fn cli_worktree_remove() {
    let cli = Cli::try_parse_from(["chart-git", "--dry", "worktree", "remove", "/tmp/wt"]).unwrap();
    assert!(cli.global.dry);
    let Some(Command::Worktree(args)) = cli.command else {
        panic!("expected worktree");
    };
    assert!(matches!(
        args.subcommand,
        WorktreeSubcommand::Remove { ref path } if path == &PathBuf::from("/tmp/wt")
    ));
}

#[test]
fn cli_worktree_add_requires_ref() {
    assert!(Cli::try_parse_from(["chart-git", "worktree", "add", "/tmp/wt"]).is_err());
}

#[test]
fn cli_changed_json() {
    let cli = Cli::try_parse_from(["chart-git", "changed", "--json"]).unwrap();
    let Some(Command::Changed(args)) = cli.command else {
        panic!("expected changed");
    };
    assert!(args.json);
    assert!(args.since.is_none());
}

// =============================================================================
// Global options
// =============================================================================

#[test]
fn cli_global_options() {
    let cli = Cli::try_parse_from([
        "chart-git",
        "--repo",
        "/srv/charts",
        "--log-file",
        "/tmp/chart-git.log",
        "--file-log-level",
        "5",
        "validate",
    ])
    .unwrap();
    assert_eq!(cli.global.repo, Some(PathBuf::from("/srv/charts")));
    assert_eq!(
        cli.global.to_config_overrides(),
        vec![
            "global.file_log_level=5",
            "global.log_file=/tmp/chart-git.log",
        ]
    );
}

#[test]
fn cli_repeated_set() {
    let cli = Cli::try_parse_from([
        "chart-git",
        "-s",
        "git.remote=upstream",
        "--set",
        "git.target_branch=master",
        "changed",
    ])
    .unwrap();
    assert_eq!(
        cli.global.options,
        vec!["git.remote=upstream", "git.target_branch=master"]
    );
}
