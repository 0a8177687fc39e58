// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository query command implementations.

use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cli::git::{
    ChangedArgs, DiffArgs, ExistsArgs, MergeBaseArgs, RemoteUrlArgs, ShowArgs, WorktreeArgs,
    WorktreeSubcommand,
};
use crate::config::Config;
use crate::core::process::executor::{ProcessExecutor, ShellExecutor};
use crate::error::Result;
use crate::git::{ChangeDetector, Git};

/// Builds the git adapter for the configured program, repository directory
/// and timeout.
#[must_use]
pub fn make_git(
    config: &Config,
    repo: Option<&Path>,
    token: CancellationToken,
) -> Git<ShellExecutor> {
    let mut exec = ShellExecutor::new().with_cancellation(token);
    if let Some(dir) = repo {
        exec = exec.with_cwd(dir);
    }
    if let Some(timeout) = config.git.timeout() {
        exec = exec.with_timeout(timeout);
    }
    Git::with_program(exec, config.git.program.clone())
}

/// Renders a list one item per line, or as a JSON array.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_list(items: &[String], json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(items)?)
    } else {
        Ok(items.join("\n"))
    }
}

fn print_list(items: &[String], json: bool) -> Result<()> {
    let rendered = render_list(items, json)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the directory is not inside a git work tree.
pub async fn run_validate_command<E: ProcessExecutor>(git: &Git<E>) -> Result<()> {
    git.validate_repository().await?;
    println!("ok");
    Ok(())
}

/// Prints `true` or `false` and returns whether the file exists.
pub async fn run_exists_command<E: ProcessExecutor>(args: &ExistsArgs, git: &Git<E>) -> bool {
    let exists = git.file_exists_on_branch(&args.commit, &args.file).await;
    println!("{exists}");
    exists
}

/// # Errors
///
/// Returns an error if `git show` fails.
pub async fn run_show_command<E: ProcessExecutor>(args: &ShowArgs, git: &Git<E>) -> Result<()> {
    let content = git.show(&args.commit, &args.file).await?;
    println!("{content}");
    Ok(())
}

/// # Errors
///
/// Returns an error if the commits have no merge base.
pub async fn run_merge_base_command<E: ProcessExecutor>(
    args: &MergeBaseArgs,
    git: &Git<E>,
) -> Result<()> {
    let base = git.merge_base(&args.left, &args.right).await?;
    println!("{base}");
    Ok(())
}

/// # Errors
///
/// Returns an error if `git diff` fails.
pub async fn run_diff_command<E: ProcessExecutor>(
    args: &DiffArgs,
    git: &Git<E>,
    config: &Config,
) -> Result<()> {
    let dirs = if args.dirs.is_empty() {
        &config.git.chart_dirs
    } else {
        &args.dirs
    };
    let files = git.list_changed_files_in_dirs(&args.commit, dirs).await?;
    print_list(&files, args.json)
}

/// # Errors
///
/// Returns an error if the remote is unknown.
pub async fn run_remote_url_command<E: ProcessExecutor>(
    args: &RemoteUrlArgs,
    git: &Git<E>,
    config: &Config,
) -> Result<()> {
    let remote = args.remote.as_deref().unwrap_or(&config.git.remote);
    let url = git.get_url_for_remote(remote).await?;
    println!("{url}");
    Ok(())
}

/// # Errors
///
/// Returns an error if the worktree cannot be added or removed.
pub async fn run_worktree_command<E: ProcessExecutor>(
    args: &WorktreeArgs,
    git: &Git<E>,
    dry_run: bool,
) -> Result<()> {
    match &args.subcommand {
        WorktreeSubcommand::Add { path, git_ref } => {
            let path = path.display().to_string();
            if dry_run {
                info!(path = %path, git_ref = %git_ref, "[dry] would add worktree");
                return Ok(());
            }
            git.add_worktree(&path, git_ref).await?;
            info!(path = %path, git_ref = %git_ref, "added worktree");
        }
        WorktreeSubcommand::Remove { path } => {
            let path = path.display().to_string();
            if dry_run {
                info!(path = %path, "[dry] would remove worktree");
                return Ok(());
            }
            git.remove_worktree(&path).await?;
            info!(path = %path, "removed worktree");
        }
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the exclusions are invalid or the diff cannot be
/// computed.
pub async fn run_changed_command<E: ProcessExecutor>(
    args: &ChangedArgs,
    git: &Git<E>,
    config: &Config,
) -> Result<()> {
    let mut git_config = config.git.clone();
    if let Some(since) = &args.since {
        git_config.since = Some(since.clone());
    }
    let detector = ChangeDetector::new(git, &git_config)?;
    let charts = detector.changed_chart_dirs().await?;
    print_list(&charts, args.json)
}
