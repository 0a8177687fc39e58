// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config: version, options, configs
//!   git:    validate, exists, show, merge-base, diff,
//!           remote-url, worktree, changed
//! ```

pub mod config;
pub mod git;
