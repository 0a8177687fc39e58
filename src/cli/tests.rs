// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::git::WorktreeSubcommand;
use crate::cli::{Cli, Command};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["chart-git", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "chart-git",
        "-l",
        "5",
        "-C",
        "/tmp/repo",
        "-c",
        "a.toml",
        "--config",
        "b.toml",
        "--dry",
        "validate",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(cli.global.repo, Some(PathBuf::from("/tmp/repo")));
    assert_eq!(
        cli.global.configs,
        vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert!(cli.global.dry);
    assert!(matches!(cli.command, Some(Command::Validate)));
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["chart-git", "-l", "6", "version"]).is_err());
}

#[test]
fn test_config_overrides() {
    let cli = Cli::try_parse_from([
        "chart-git",
        "-s",
        "git.remote=upstream",
        "-l",
        "4",
        "--dry",
        "options",
    ])
    .unwrap();

    assert_eq!(
        cli.global.to_config_overrides(),
        vec![
            "git.remote=upstream",
            "global.log_level=4",
            "global.file_log_level=4",
            "global.dry=true",
        ]
    );
}

#[test]
fn test_parse_worktree_add() {
    let cli = Cli::try_parse_from(["chart-git", "worktree", "add", "/tmp/wt", "origin/main"])
        .unwrap();
    let Some(Command::Worktree(args)) = cli.command else {
        panic!("expected worktree command");
    };
    match args.subcommand {
        WorktreeSubcommand::Add { path, git_ref } => {
            assert_eq!(path, PathBuf::from("/tmp/wt"));
            assert_eq!(git_ref, "origin/main");
        }
        WorktreeSubcommand::Remove { .. } => panic!("expected add"),
    }
}

#[test]
fn test_parse_diff() {
    let cli = Cli::try_parse_from(["chart-git", "diff", "abc123", "charts", "stable", "--json"])
        .unwrap();
    let Some(Command::Diff(args)) = cli.command else {
        panic!("expected diff command");
    };
    assert_eq!(args.commit, "abc123");
    assert_eq!(args.dirs, vec!["charts", "stable"]);
    assert!(args.json);
}

#[test]
fn test_parse_changed_and_remote_url() {
    let cli = Cli::try_parse_from(["chart-git", "changed", "--since", "v1.0.0"]).unwrap();
    let Some(Command::Changed(args)) = cli.command else {
        panic!("expected changed command");
    };
    assert_eq!(args.since.as_deref(), Some("v1.0.0"));
    assert!(!args.json);

    let cli = Cli::try_parse_from(["chart-git", "remote-url"]).unwrap();
    let Some(Command::RemoteUrl(args)) = cli.command else {
        panic!("expected remote-url command");
    };
    assert!(args.remote.is_none());
}

#[test]
fn test_merge_base_requires_two_commits() {
    assert!(Cli::try_parse_from(["chart-git", "merge-base", "HEAD"]).is_err());
}
