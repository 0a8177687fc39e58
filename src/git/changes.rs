// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Changed chart detection.
//!
//! ```text
//! since_ref (remote/target_branch | git.since)
//!        |
//!        v
//! merge_base(since_ref, HEAD)
//!        |
//!        v
//! list_changed_files_in_dirs(base, chart_dirs)
//!        |
//!        v
//! charts/foo/templates/x.yaml --> charts/foo
//!   skip: files directly in a chart dir, excluded globs,
//!         dirs without Chart.yaml at HEAD
//!        |
//!        v
//! deduped chart dirs (first-seen order)
//! ```

use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};
use wax::{Glob, Program as _};

use super::tool::Git;
use crate::config::types::GitConfig;
use crate::core::process::executor::ProcessExecutor;
use crate::error::{ChartGitResult, ConfigError};

/// Chart metadata file that marks a chart root.
pub const CHART_FILE: &str = "Chart.yaml";

/// Strip a leading `./` and trailing slashes so a configured dir compares
/// against the repo-relative paths git prints.
fn normalize_dir(dir: &str) -> &str {
    let mut dir = dir.trim_end_matches('/');
    while let Some(rest) = dir.strip_prefix("./") {
        dir = rest;
    }
    dir
}

/// Map a changed file to the chart directory that owns it.
///
/// The longest chart dir containing `file` wins, so nested chart dirs such as
/// `charts` and `charts/incubator` both work. Returns
/// `<chart_dir>/<first component below it>`, or `None` when the file is
/// outside every chart dir or sits directly inside the owning one.
#[must_use]
pub fn chart_dir_for_file<S: AsRef<str>>(file: &str, chart_dirs: &[S]) -> Option<String> {
    let (dir, rest) = chart_dirs
        .iter()
        .map(|dir| normalize_dir(dir.as_ref()))
        .filter(|dir| !dir.is_empty())
        .filter_map(|dir| Some((dir, file.strip_prefix(dir)?.strip_prefix('/')?)))
        .max_by_key(|(dir, _)| dir.len())?;
    let (chart, _) = rest.split_once('/')?;
    (!chart.is_empty()).then(|| format!("{dir}/{chart}"))
}

/// Computes which charts changed relative to the target branch.
pub struct ChangeDetector<'a, E> {
    git: &'a Git<E>,
    config: &'a GitConfig,
    excluded: Vec<Glob<'a>>,
}

impl<'a, E: ProcessExecutor> ChangeDetector<'a, E> {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if an exclusion is not a valid glob.
    pub fn new(git: &'a Git<E>, config: &'a GitConfig) -> Result<Self, ConfigError> {
        let excluded = config
            .excluded_charts
            .iter()
            .map(|pattern| {
                Glob::new(pattern).map_err(|e| ConfigError::InvalidValue {
                    section: "git".to_string(),
                    key: "excluded_charts".to_string(),
                    message: format!("'{pattern}': {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            git,
            config,
            excluded,
        })
    }

    #[must_use]
    pub fn since_ref(&self) -> String {
        self.config.since_ref()
    }

    /// Whether a chart directory matches an exclusion by name or full path.
    #[must_use]
    pub fn is_excluded(&self, chart_dir: &str) -> bool {
        let name = Path::new(chart_dir)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(chart_dir);
        self.excluded
            .iter()
            .any(|glob| glob.is_match(name) || glob.is_match(chart_dir))
    }

    /// Chart directories with changes since the merge base of the comparison
    /// ref and `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the merge base or the diff cannot be computed.
    pub async fn changed_chart_dirs(&self) -> ChartGitResult<Vec<String>> {
        let since = self.since_ref();
        let base = self.git.merge_base(&since, "HEAD").await?;
        debug!(since = %since, merge_base = %base, "comparing against merge base");

        let files = self
            .git
            .list_changed_files_in_dirs(&base, &self.config.chart_dirs)
            .await?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut charts: Vec<String> = Vec::new();
        for file in &files {
            let Some(dir) = chart_dir_for_file(file, &self.config.chart_dirs) else {
                debug!(file = %file, "file does not belong to a chart");
                continue;
            };
            if !seen.insert(dir.clone()) {
                continue;
            }
            if self.is_excluded(&dir) {
                debug!(chart = %dir, "chart excluded");
                continue;
            }
            let chart_file = format!("{dir}/{CHART_FILE}");
            if !self.git.file_exists_on_branch("HEAD", &chart_file).await {
                debug!(chart = %dir, "no {} at HEAD, skipping", CHART_FILE);
                continue;
            }
            charts.push(dir);
        }

        info!(since = %since, files = files.len(), charts = charts.len(), "computed changed charts");
        Ok(charts)
    }
}
