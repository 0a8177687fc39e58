// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!        changes.rs
//!   ChangeDetector (changed charts)
//!            |
//!            v
//!        tool.rs
//!   Git<E: ProcessExecutor>
//!   cat-file / worktree / show / merge-base
//!   diff / ls-remote / rev-parse
//!            |
//!            v
//!   ShellExecutor --> git (subprocess)
//! ```
//!
//! Every query shells out to the git CLI; nothing reads `.git/` directly.

pub mod changes;
pub mod tool;

pub use changes::ChangeDetector;
pub use tool::Git;
