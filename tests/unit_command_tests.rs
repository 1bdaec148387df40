//! # Command Module Unit Tests / 命令模块单元测试
//!
//! Command-line parsing and output capture of child processes.
//!
//! 命令行解析以及子进程输出的捕获。

use spec_splitter::infra::command::{build_command, parse_command, spawn_and_capture};

#[test]
fn expands_environment_variables() {
    let Ok(home) = std::env::var("HOME") else {
        return;
    };
    let (program, args) = parse_command("$HOME/bin/rspec --require rails_helper").unwrap();
    assert_eq!(program, format!("{home}/bin/rspec"));
    assert_eq!(args, vec!["--require", "rails_helper"]);
}

#[test]
fn unbalanced_quotes_are_rejected() {
    assert!(parse_command("rspec 'unterminated").is_err());
}

#[cfg(unix)]
#[tokio::test]
async fn captures_stdout_and_stderr_separately() {
    let mut cmd = build_command("sh -c").unwrap();
    cmd.arg("printf '{\"seed\":1}'; echo oops >&2; exit 3");
    let output = spawn_and_capture(cmd).await.unwrap();
    assert_eq!(output.stdout, b"{\"seed\":1}");
    assert_eq!(output.stderr.trim(), "oops");
    assert_eq!(output.status.code(), Some(3));
}

#[cfg(unix)]
#[tokio::test]
async fn passes_environment_to_child() {
    let mut cmd = build_command("sh -c").unwrap();
    cmd.arg("printf \"$DATABASE_NUMBER\"").env("DATABASE_NUMBER", "7");
    let output = spawn_and_capture(cmd).await.unwrap();
    assert_eq!(output.stdout, b"7");
}

#[tokio::test]
async fn unknown_program_fails_to_spawn() {
    let cmd = build_command("spec-splitter-no-such-program").unwrap();
    assert!(spawn_and_capture(cmd).await.is_err());
}
