//! # Command Execution Module / 命令执行模块
//!
//! Builds child processes from user-configured command strings and captures their output.
//!
//! 根据用户配置的命令字符串构建子进程并捕获其输出。

use anyhow::{Context, Result, anyhow};
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Everything a finished child process left behind.
/// 已结束子进程留下的全部内容。
#[derive(Debug)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    /// Raw stdout bytes. Decoding is the caller's business.
    /// 原始 stdout 字节。由调用者负责解码。
    pub stdout: Vec<u8>,
    pub stderr: String,
}

/// Expands `~` and `$VAR` in `template` and splits it shell-style into a program and its arguments.
///
/// # Arguments
/// * `template` - A command line such as `bundle exec rspec`
///
/// # Returns
/// The program followed by its leading arguments
///
/// 展开 `template` 中的 `~` 和 `$VAR`，并按 shell 规则拆分为程序及其参数。
pub fn parse_command(template: &str) -> Result<(String, Vec<String>)> {
    let expanded = shellexpand::full(template)
        .with_context(|| format!("Failed to expand command: {template}"))?
        .to_string();

    let mut parts = shlex::split(&expanded)
        .ok_or_else(|| anyhow!("Failed to parse command: {}", expanded))?
        .into_iter();

    let program = parts
        .next()
        .ok_or_else(|| anyhow!("Empty command after parsing."))?;
    Ok((program, parts.collect()))
}

/// Creates a `tokio` command from a configured command line.
/// The child is killed if the returned command's process handle is dropped.
///
/// 从配置的命令行创建 `tokio` 命令。若进程句柄被丢弃，子进程会被终止。
pub fn build_command(template: &str) -> Result<Command> {
    let (program, args) = parse_command(template)?;
    let mut cmd = Command::new(program);
    cmd.args(args).kill_on_drop(true);
    Ok(cmd)
}

/// Spawns a command and captures its stdout and stderr.
/// Both streams are drained concurrently so a chatty child cannot block on a full pipe.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// The exit status with both captured streams, or the error that prevented spawning.
///
/// 派生一个命令，捕获其 stdout 和 stderr。两个流被并发读取，避免子进程因管道写满而阻塞。
pub async fn spawn_and_capture(mut cmd: Command) -> std::io::Result<CapturedOutput> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("failed to capture stdout"))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("failed to capture stderr"))?;

    let stdout_handle = tokio::spawn(async move {
        let mut buf = Vec::new();
        stdout.read_to_end(&mut buf).await.map(|_| buf)
    });
    let stderr_handle = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr.read_to_end(&mut buf).await.map(|_| buf)
    });

    let status = child.wait().await?;

    // Wait for both readers so no trailing output is lost.
    // 等待两个读取任务，确保不丢失末尾输出。
    let stdout = stdout_handle.await.map_err(std::io::Error::other)??;
    let stderr = stderr_handle.await.map_err(std::io::Error::other)??;

    Ok(CapturedOutput {
        status,
        stdout,
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_command_splits_quoted_arguments() {
        let (program, args) = parse_command("bundle exec 'rspec --tag slow'").unwrap();
        assert_eq!(program, "bundle");
        assert_eq!(args, vec!["exec", "rspec --tag slow"]);
    }

    #[test]
    fn parse_command_rejects_empty_input() {
        assert!(parse_command("   ").is_err());
    }

    #[test]
    fn parse_command_rejects_unbalanced_quotes() {
        assert!(parse_command("bundle exec 'rspec").is_err());
    }
}
