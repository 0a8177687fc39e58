// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};
use tracing::Level;

#[test]
fn test_log_level_range() {
    assert_eq!(LogLevel::from_u8(0), Some(LogLevel::SILENT));
    assert_eq!(LogLevel::from_u8(5), Some(LogLevel::TRACE));
    assert_eq!(LogLevel::from_u8(6), None);

    let err = LogLevel::new(9).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'log_level' in section '[global]': log level must be 0-5, got 9"
    );
}

#[test]
fn test_log_level_tracing_mapping() {
    let mapped: Vec<_> = (0..=5)
        .map(|n| {
            let level = LogLevel::from_u8(n).unwrap();
            (level.to_filter_string(), level.to_tracing_level())
        })
        .collect();
    assert_eq!(
        mapped,
        vec![
            ("off", None),
            ("error", Some(Level::ERROR)),
            ("warn", Some(Level::WARN)),
            ("info", Some(Level::INFO)),
            ("debug", Some(Level::DEBUG)),
            ("trace", Some(Level::TRACE)),
        ]
    );
}

#[test]
fn test_log_level_serde_as_integer() {
    let json = serde_json::to_string(&LogLevel::DEBUG).unwrap();
    assert_eq!(json, "4");

    let parsed: LogLevel = serde_json::from_str("2").unwrap();
    assert_eq!(parsed, LogLevel::WARN);

    assert!(serde_json::from_str::<LogLevel>("42").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.json_file());
    assert!(!config.show_target());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::WARN)
        .maybe_with_log_file(Some("out/chart-git.log".to_string()))
        .with_json_file(true)
        .build();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.log_file(), Some("out/chart-git.log"));
    assert!(config.json_file());
}
