// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository queries backed by the git CLI.
//!
//! ```text
//! file_exists_on_branch  cat-file -e <commit>:<file>
//! add_worktree           worktree add <path> <ref>
//! remove_worktree        worktree remove <path>
//! show                   show <commit>:<file>
//! merge_base             merge-base <c1> <c2>
//! list_changed_files_in_dirs
//!                        diff --find-renames --name-only <commit> -- <dirs..>
//! get_url_for_remote     ls-remote --get-url <remote>
//! validate_repository    rev-parse --is-inside-work-tree
//! ```

use tracing::debug;

use crate::core::process::executor::ProcessExecutor;
use crate::error::{ChartGitResult, GitError};

/// Default git executable name.
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Git query adapter.
///
/// Every operation is a single `git` invocation through the executor.
#[derive(Debug, Clone)]
pub struct Git<E> {
    exec: E,
    program: String,
}

fn object_spec(commit: &str, file: &str) -> String {
    format!("{commit}:{file}")
}

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(ToString::to_string).collect()
}

impl<E: ProcessExecutor> Git<E> {
    pub fn new(exec: E) -> Self {
        Self::with_program(exec, DEFAULT_GIT_PROGRAM)
    }

    /// Uses `program` instead of `git` (e.g. an absolute path).
    pub fn with_program(exec: E, program: impl Into<String>) -> Self {
        Self {
            exec,
            program: program.into(),
        }
    }

    pub const fn executor(&self) -> &E {
        &self.exec
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check whether `file` exists in the tree of `commit`.
    ///
    /// Any failure (bad ref, missing file, missing git) reads as `false`.
    pub async fn file_exists_on_branch(&self, commit: &str, file: &str) -> bool {
        let spec = object_spec(commit, file);
        let result = self
            .exec
            .run_process_and_capture_output(&self.program, &to_args(&["cat-file", "-e", &spec]))
            .await;
        if let Err(e) = &result {
            debug!(spec = %spec, error = %e, "object not found");
        }
        result.is_ok()
    }

    /// Add a linked worktree at `path` checked out at `git_ref`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::AddWorktree` if `git worktree add` fails.
    pub async fn add_worktree(&self, path: &str, git_ref: &str) -> ChartGitResult<()> {
        self.exec
            .run_process(&self.program, &to_args(&["worktree", "add", path, git_ref]))
            .await
            .map_err(|cause| GitError::AddWorktree {
                path: path.to_string(),
                cause,
            })?;
        Ok(())
    }

    /// Remove the linked worktree at `path`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RemoveWorktree` if `git worktree remove` fails.
    pub async fn remove_worktree(&self, path: &str) -> ChartGitResult<()> {
        self.exec
            .run_process(&self.program, &to_args(&["worktree", "remove", path]))
            .await
            .map_err(|cause| GitError::RemoveWorktree {
                path: path.to_string(),
                cause,
            })?;
        Ok(())
    }

    /// Contents of `file` as of `commit`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Show` if the object cannot be shown.
    pub async fn show(&self, commit: &str, file: &str) -> ChartGitResult<String> {
        let spec = object_spec(commit, file);
        let args = to_args(&["show", &spec]);
        let content = self
            .exec
            .run_process_and_capture_output(&self.program, &args)
            .await
            .map_err(|cause| GitError::Show { spec, cause })?;
        Ok(content)
    }

    /// Best common ancestor of two commits.
    ///
    /// # Errors
    ///
    /// Returns `GitError::MergeBase` if the commits are unknown or unrelated.
    pub async fn merge_base(&self, commit1: &str, commit2: &str) -> ChartGitResult<String> {
        let base = self
            .exec
            .run_process_and_capture_output(
                &self.program,
                &to_args(&["merge-base", commit1, commit2]),
            )
            .await
            .map_err(|cause| GitError::MergeBase {
                left: commit1.to_string(),
                right: commit2.to_string(),
                cause,
            })?;
        Ok(base)
    }

    /// Files changed between `commit` and the work tree, limited to `dirs`.
    ///
    /// Renames are detected. Empty output yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Diff` if `git diff` fails.
    pub async fn list_changed_files_in_dirs<S: AsRef<str>>(
        &self,
        commit: &str,
        dirs: &[S],
    ) -> ChartGitResult<Vec<String>> {
        let mut args = to_args(&["diff", "--find-renames", "--name-only", commit, "--"]);
        args.extend(dirs.iter().map(|d| d.as_ref().to_string()));

        let output = self
            .exec
            .run_process_and_capture_output(&self.program, &args)
            .await
            .map_err(GitError::Diff)?;

        if output.is_empty() {
            return Ok(Vec::new());
        }
        Ok(output.split('\n').map(String::from).collect())
    }

    /// Fetch URL configured for `remote`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RemoteUrl` if the lookup fails.
    pub async fn get_url_for_remote(&self, remote: &str) -> ChartGitResult<String> {
        let url = self
            .exec
            .run_process_and_capture_output(
                &self.program,
                &to_args(&["ls-remote", "--get-url", remote]),
            )
            .await
            .map_err(|cause| GitError::RemoteUrl {
                remote: remote.to_string(),
                cause,
            })?;
        Ok(url)
    }

    /// Check that the working directory is inside a git work tree.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NotARepository` otherwise.
    pub async fn validate_repository(&self) -> ChartGitResult<()> {
        self.exec
            .run_process_and_capture_output(
                &self.program,
                &to_args(&["rev-parse", "--is-inside-work-tree"]),
            )
            .await
            .map_err(GitError::NotARepository)?;
        Ok(())
    }
}
