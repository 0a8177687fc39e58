// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for chart-git.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. chart-git.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. CHART_GIT_* env vars
//! 5. --set KEY=VALUE
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! CHART_GIT_GLOBAL__DRY=true           → global.dry = true
//! CHART_GIT_GIT__REMOTE=upstream       → git.remote = "upstream"
//! CHART_GIT_GIT__TARGET_BRANCH=master  → git.target_branch = "master"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig};

/// Default configuration file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "chart-git.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CHART_GIT";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Repository settings.
    pub git: GitConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use chart_git::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("chart-git.toml")
    ///     .with_env_prefix("CHART_GIT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values that serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for an empty git program, an empty
    /// chart directory, or an exclusion that is not a valid glob.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::InvalidValue {
            section: "git".to_string(),
            key: key.to_string(),
            message,
        };

        if self.git.program.trim().is_empty() {
            return Err(invalid("program", "must not be empty".to_string()));
        }
        if self.git.chart_dirs.iter().any(|d| d.trim().is_empty()) {
            return Err(invalid(
                "chart_dirs",
                "entries must not be empty".to_string(),
            ));
        }
        for pattern in &self.git.excluded_charts {
            wax::Glob::new(pattern)
                .map_err(|e| invalid("excluded_charts", format!("'{pattern}': {e}")))?;
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_git_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.log_level".into(),
            self.global.log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("global.json_log".into(), self.global.json_log.to_string());
    }

    fn format_git_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("git.program".into(), self.git.program.clone());
        options.insert("git.remote".into(), self.git.remote.clone());
        options.insert("git.target_branch".into(), self.git.target_branch.clone());
        options.insert("git.since".into(), self.git.since_ref());
        options.insert("git.chart_dirs".into(), self.git.chart_dirs.join(", "));
        options.insert(
            "git.excluded_charts".into(),
            self.git.excluded_charts.join(", "),
        );
        options.insert(
            "git.timeout_secs".into(),
            self.git.timeout_secs.to_string(),
        );
    }
}
