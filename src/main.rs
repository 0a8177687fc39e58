// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | Configs | Validate | Exists | Show
//!   MergeBase | Diff | RemoteUrl | Worktree | Changed
//! ```

use std::process::ExitCode;

use chart_git::cli::global::GlobalOptions;
use chart_git::cli::{self, Command};
use chart_git::cmd::config::{run_configs_command, run_options_command, run_version_command};
use chart_git::cmd::git::{
    make_git, run_changed_command, run_diff_command, run_exists_command, run_merge_base_command,
    run_remote_url_command, run_show_command, run_validate_command, run_worktree_command,
};
use chart_git::config::loader::ConfigLoader;
use chart_git::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use chart_git::logging::{LogConfig, init_logging};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    // Version and configs don't need a valid config or logging.
    match &cli.command {
        Some(Command::Version) => {
            run_version_command();
            return ExitCode::SUCCESS;
        }
        Some(Command::Configs) => {
            run_configs_command(&build_config_loader(&cli.global).format_loaded_files());
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let token = CancellationToken::new();
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling running git processes");
            ctrl_c_token.cancel();
        }
    });

    dispatch_command(&cli, &config, token).await
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .with_json_file(config.global.json_log)
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: &Config, token: CancellationToken) -> ExitCode {
    let Some(command) = &cli.command else {
        eprintln!("No command specified. Use --help for usage information.");
        return ExitCode::FAILURE;
    };

    let git = make_git(config, cli.global.repo.as_deref(), token);
    debug!(program = %git.program(), repo = ?cli.global.repo, "dispatching command");

    let dry = config.global.dry;
    let result = match command {
        Command::Version | Command::Configs => Ok(()),
        Command::Options => {
            run_options_command(config);
            Ok(())
        }
        Command::Validate => run_validate_command(&git).await,
        Command::Exists(args) => {
            return if run_exists_command(args, &git).await {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
        Command::Show(args) => run_show_command(args, &git).await,
        Command::MergeBase(args) => run_merge_base_command(args, &git).await,
        Command::Diff(args) => run_diff_command(args, &git, config).await,
        Command::RemoteUrl(args) => run_remote_url_command(args, &git, config).await,
        Command::Worktree(args) => run_worktree_command(args, &git, dry).await,
        Command::Changed(args) => run_changed_command(args, &git, config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(global: &GlobalOptions) -> chart_git::error::Result<Config> {
    let mut loader = build_config_loader(global);
    for assignment in global.to_config_overrides() {
        loader = loader.set_assignment(&assignment)?;
    }
    loader.build()
}
