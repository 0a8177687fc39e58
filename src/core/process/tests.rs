// chart-git: Git query adapter for chart repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::builder::{ProcessBuilder, ProcessFlags};
use super::executor::{ProcessExecutor, ShellExecutor};
use crate::error::ProcessError;

#[cfg(unix)]
fn sh(script: &str) -> ProcessBuilder {
    ProcessBuilder::new("/bin/sh").arg("-c").arg(script)
}

#[cfg(unix)]
fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_echo() {
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .capture_output()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    assert_eq!(output.stdout(), "hello\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_non_zero_exit_keeps_stderr() {
    let err = sh("echo 'boom' >&2; exit 3")
        .name("boom")
        .capture_output()
        .run()
        .await
        .expect_err("exit 3 should fail");

    match err {
        ProcessError::NonZeroExit { code, stderr, .. } => {
            assert_eq!(code, 3);
            assert_eq!(stderr, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_allow_failure() {
    let output = sh("exit 42")
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.exit_code(), 42);
    assert!(!output.success());
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_custom_success_codes() {
    let output = sh("exit 1")
        .success_codes([0, 1])
        .run()
        .await
        .expect("exit 1 is in the success set");
    assert_eq!(output.exit_code(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_env_is_layered() {
    let output = sh("echo \"$CHART_GIT_TEST_VAR:${PATH:+has-path}\"")
        .env("CHART_GIT_TEST_VAR", "test_value")
        .capture_stdout()
        .run()
        .await
        .expect("process should succeed");

    assert_eq!(output.stdout(), "test_value:has-path\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_cwd() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let output = ProcessBuilder::new("pwd")
        .cwd(temp.path())
        .capture_stdout()
        .run()
        .await
        .expect("pwd should succeed");

    let expected = temp.path().canonicalize().unwrap();
    assert_eq!(
        std::path::Path::new(output.stdout().trim_end()).canonicalize().unwrap(),
        expected
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_large_output_does_not_block() {
    let output = sh("yes chart | head -n 50000")
        .capture_output()
        .timeout(Duration::from_secs(30))
        .run()
        .await
        .expect("large output should be drained");

    assert_eq!(output.stdout().lines().count(), 50000);
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_timeout() {
    let err = sh("sleep 5")
        .timeout(Duration::from_millis(100))
        .run()
        .await
        .expect_err("sleep should time out");

    assert!(matches!(err, ProcessError::Timeout { .. }), "got: {err}");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_cancelled_before_spawn() {
    let token = CancellationToken::new();
    token.cancel();

    let output = sh("exit 0")
        .run_with_cancellation(token)
        .await
        .expect("pre-cancelled run returns output");
    assert!(output.is_interrupted());
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_cancelled_while_running() {
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let output = sh("sleep 5")
        .run_with_cancellation(token)
        .await
        .expect("cancelled run returns output");
    assert!(output.is_interrupted());
}

#[tokio::test]
async fn test_process_spawn_failure_names_command() {
    let err = ProcessBuilder::new("/nonexistent/chart-git-test-binary")
        .arg("--flag")
        .run()
        .await
        .expect_err("spawn should fail");

    match err {
        ProcessError::SpawnFailed { command, .. } => {
            assert_eq!(command, "chart-git-test-binary --flag");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_command_line_quotes_arguments() {
    let builder = ProcessBuilder::new("git")
        .args(["diff", "--name-only", "main", "--", "my charts", ""]);
    insta::assert_snapshot!(builder.command_line(), @r#"git diff --name-only main -- "my charts" """#);
}

#[test]
fn test_executable_lookup_not_found() {
    let program = "nonexistent_program_12345";

    let err = ProcessBuilder::which(program).unwrap_err();
    assert!(err.to_string().contains(program), "got: {err}");
    assert!(!ProcessBuilder::exists(program));
    assert!(ProcessBuilder::find(program).is_none());
}

#[cfg(unix)]
#[test]
fn test_executable_lookup_found() {
    let path = ProcessBuilder::find("sh").expect("sh should be in PATH");
    assert!(path.exists());
    assert!(ProcessBuilder::exists("sh"));
    // second lookup hits the cache
    assert_eq!(ProcessBuilder::find("sh"), Some(path));
}

#[cfg(unix)]
#[tokio::test]
async fn test_shell_executor_trims_output() {
    let executor = ShellExecutor::new();
    let stdout = executor
        .run_process_and_capture_output("sh", &args(&["-c", "printf '\\n  value  \\n\\n'"]))
        .await
        .expect("capture should succeed");
    assert_eq!(stdout, "value");
}

#[cfg(unix)]
#[tokio::test]
async fn test_shell_executor_sets_git_env() {
    let executor = ShellExecutor::new();
    let stdout = executor
        .run_process_and_capture_output(
            "sh",
            &args(&["-c", "echo \"$GIT_TERMINAL_PROMPT $GCM_INTERACTIVE\""]),
        )
        .await
        .expect("capture should succeed");
    assert_eq!(stdout, "0 never");
}

#[cfg(unix)]
#[tokio::test]
async fn test_shell_executor_run_process_failure_carries_stderr() {
    let executor = ShellExecutor::new();
    let err = executor
        .run_process("sh", &args(&["-c", "echo out; echo 'fatal: nope' >&2; exit 128"]))
        .await
        .expect_err("exit 128 should fail");

    assert_eq!(err.exit_code(), Some(128));
    assert_eq!(err.stderr(), Some("fatal: nope"));
}

#[tokio::test]
async fn test_shell_executor_missing_program() {
    let executor = ShellExecutor::new();
    let err = executor
        .run_process_and_capture_output("nonexistent_program_12345", &[])
        .await
        .expect_err("missing program should fail");
    assert!(matches!(err, ProcessError::ExecutableNotFound { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_shell_executor_cancelled_token_is_error() {
    let token = CancellationToken::new();
    token.cancel();
    let executor = ShellExecutor::new().with_cancellation(token);

    let err = executor
        .run_process("sh", &args(&["-c", "exit 0"]))
        .await
        .expect_err("cancelled executor should report interruption");
    assert!(matches!(err, ProcessError::Interrupted { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_shell_executor_timeout() {
    let executor = ShellExecutor::new().with_timeout(Duration::from_millis(100));
    let err = executor
        .run_process("sh", &args(&["-c", "sleep 5"]))
        .await
        .expect_err("sleep should time out");
    assert!(matches!(err, ProcessError::Timeout { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_keeps_bytes_after_invalid_utf8() {
    let output = sh("printf 'line1\\nca\\351f\\nline3\\n'")
        .capture_output()
        .run()
        .await
        .expect("printf should succeed");

    assert_eq!(output.stdout(), "line1\nca\u{FFFD}f\nline3\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_drains_large_output_after_invalid_utf8() {
    let output = sh("printf '\\351\\n'; yes chart | head -n 200000")
        .capture_output()
        .timeout(Duration::from_secs(30))
        .run()
        .await
        .expect("whole stream should be drained");

    assert!(output.stdout().starts_with("\u{FFFD}\nchart\n"));
    assert_eq!(output.stdout().lines().count(), 200_001);
}

#[cfg(unix)]
#[tokio::test]
async fn test_shell_executor_keeps_interior_crlf() {
    let executor = ShellExecutor::new();
    let stdout = executor
        .run_process_and_capture_output("sh", &args(&["-c", "printf 'a\\r\\nb\\r\\n'"]))
        .await
        .expect("capture should succeed");
    assert_eq!(stdout, "a\r\nb");
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_expected_failure_is_silent_at_info() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let executor = ShellExecutor::new();
    let err = executor
        .run_process_and_capture_output(
            "sh",
            &args(&["-c", "echo \"fatal: path 'nope.yaml' does not exist\" >&2; exit 128"]),
        )
        .await
        .expect_err("exit 128 should fail");

    assert_eq!(err.exit_code(), Some(128));
    assert_eq!(logs.contents(), "", "failures are left to the caller to report");
}
