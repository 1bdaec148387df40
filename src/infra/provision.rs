//! # Resource Provisioner / 资源准备器
//!
//! Prepares the isolated database behind every slot by running the configured
//! provisioning task once per slot, one slot at a time.
//!
//! 通过为每个槽位依次运行一次配置的准备任务，准备每个槽位背后的隔离数据库。

use colored::*;
use std::fmt;
use std::str::FromStr;

use crate::core::config::SplitterConfig;
use crate::core::error::SplitError;
use crate::infra::command::{build_command, spawn_and_capture};
use crate::infra::t;

/// Database actions the provisioner knows how to perform.
/// 准备器支持的数据库操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbAction {
    Create,
    Migrate,
}

impl DbAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbAction::Create => "create",
            DbAction::Migrate => "migrate",
        }
    }
}

impl fmt::Display for DbAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbAction {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(DbAction::Create),
            "migrate" => Ok(DbAction::Migrate),
            other => Err(SplitError::Config(format!(
                "valid database actions are 'create' or 'migrate', got '{other}'"
            ))),
        }
    }
}

/// Runs `action` for a single slot and returns the task's stdout.
/// A process that cannot start or exits non-zero is fatal.
///
/// 为单个槽位运行 `action` 并返回任务的 stdout。无法启动或以非零状态退出的进程是致命的。
pub async fn provision_slot(
    config: &SplitterConfig,
    action: DbAction,
    slot: usize,
) -> Result<String, SplitError> {
    let fail = |reason: String| SplitError::Provision {
        action: action.to_string(),
        slot,
        reason,
    };

    let mut cmd = build_command(&config.provisioner.command).map_err(|e| fail(e.to_string()))?;
    cmd.arg(config.provisioner.task_for(action.as_str()))
        .envs(&config.provisioner.env)
        .env(&config.slot_env, slot.to_string());

    tracing::debug!(slot, %action, "running provisioner");
    let output = spawn_and_capture(cmd).await.map_err(|e| fail(e.to_string()))?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if !output.status.success() {
        return Err(fail(format!(
            "{}\n{}{}",
            output.status, stdout, output.stderr
        )));
    }
    Ok(stdout)
}

/// Runs `action` on every slot `0..config.slots`, stopping at the first failure.
/// 对每个槽位 `0..config.slots` 运行 `action`，遇到第一个失败即停止。
pub async fn provision_all(
    config: &SplitterConfig,
    action: DbAction,
    locale: &str,
) -> Result<(), SplitError> {
    for slot in 0..config.slots {
        let output = provision_slot(config, action, slot).await?;
        println!(
            "{} {}",
            t!("provision.slot_done", locale = locale, slot = slot).green(),
            output.trim_end()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_actions_only() {
        assert_eq!("create".parse::<DbAction>().unwrap(), DbAction::Create);
        assert_eq!("migrate".parse::<DbAction>().unwrap(), DbAction::Migrate);
        assert!("drop".parse::<DbAction>().is_err());
    }
}
