//! # Configuration Module / 配置模块
//!
//! Loads the optional `SpecSplitter.toml` file that describes how the test runner and
//! the database provisioner are invoked, how many groups to split into, and which
//! environment variable carries the slot number.
//!
//! 加载可选的 `SpecSplitter.toml` 文件，该文件描述如何调用测试运行器和数据库准备器、
//! 拆分为多少个分组，以及哪个环境变量携带槽位编号。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::error::SplitError;
use crate::core::planner::DEFAULT_GROUPS;

/// File looked up in the working directory when `--config` is not given.
/// 未指定 `--config` 时在工作目录中查找的文件。
pub const DEFAULT_CONFIG_FILE: &str = "SpecSplitter.toml";

/// How a group of anchors is handed to the test framework.
/// 如何将一组锚点交给测试框架。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunnerConfig {
    /// Program and leading arguments, split shell-style after `~`/`$VAR` expansion.
    /// 程序及前置参数，在 `~`/`$VAR` 展开后按 shell 规则拆分。
    #[serde(default = "default_runner_command")]
    pub command: String,
    /// Arguments appended after the anchors. They must make the runner print JSON.
    /// 追加在锚点之后的参数。它们必须让运行器输出 JSON。
    #[serde(default = "default_runner_args")]
    pub args: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            command: default_runner_command(),
            args: default_runner_args(),
        }
    }
}

/// How a slot's isolated database is created or migrated.
/// 如何创建或迁移某个槽位的隔离数据库。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProvisionerConfig {
    #[serde(default = "default_provisioner_command")]
    pub command: String,
    /// Task argument; `{action}` is replaced with `create` or `migrate`.
    /// 任务参数；`{action}` 会被替换为 `create` 或 `migrate`。
    #[serde(default = "default_provisioner_task")]
    pub task: String,
    /// Extra environment for every provisioning process.
    /// 每个准备进程的额外环境变量。
    #[serde(default = "default_provisioner_env")]
    pub env: BTreeMap<String, String>,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            command: default_provisioner_command(),
            task: default_provisioner_task(),
            env: default_provisioner_env(),
        }
    }
}

impl ProvisionerConfig {
    pub fn task_for(&self, action: &str) -> String {
        self.task.replace("{action}", action)
    }
}

/// The whole splitter configuration.
/// 完整的拆分器配置。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SplitterConfig {
    /// Language for output messages. Detected from the system when absent.
    /// 输出消息的语言。缺省时从系统检测。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Maximum number of execution groups (K).
    #[serde(default = "default_groups")]
    pub groups: usize,
    /// Number of provisioned database slots, numbered from 0.
    #[serde(default = "default_slots")]
    pub slots: usize,
    /// Environment variable that tells a process which slot it owns.
    #[serde(default = "default_slot_env")]
    pub slot_env: String,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub provisioner: ProvisionerConfig,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            language: None,
            groups: default_groups(),
            slots: default_slots(),
            slot_env: default_slot_env(),
            runner: RunnerConfig::default(),
            provisioner: ProvisionerConfig::default(),
        }
    }
}

impl SplitterConfig {
    /// Checks the values a run depends on.
    /// Every group needs its own provisioned slot, so `groups` may not exceed `slots`.
    ///
    /// 检查运行所依赖的值。每个分组都需要自己的槽位，因此 `groups` 不能超过 `slots`。
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.groups == 0 || self.groups > self.slots {
            return Err(SplitError::InvalidGroupCount {
                requested: self.groups,
                max: self.slots,
            });
        }
        if self.runner.command.trim().is_empty() {
            return Err(SplitError::Config("runner.command is empty".to_string()));
        }
        self.validate_provisioning()
    }

    /// Checks only what `create` and `migrate` use; the group count plays no part there.
    /// 仅检查 `create` 和 `migrate` 使用的字段；分组数量与其无关。
    pub fn validate_provisioning(&self) -> Result<(), SplitError> {
        if self.slots == 0 {
            return Err(SplitError::Config("slots must be at least 1".to_string()));
        }
        if self.provisioner.command.trim().is_empty() {
            return Err(SplitError::Config("provisioner.command is empty".to_string()));
        }
        if self.slot_env.trim().is_empty() {
            return Err(SplitError::Config("slot_env is empty".to_string()));
        }
        Ok(())
    }
}

fn default_groups() -> usize {
    DEFAULT_GROUPS
}

fn default_slots() -> usize {
    DEFAULT_GROUPS
}

fn default_slot_env() -> String {
    "DATABASE_NUMBER".to_string()
}

fn default_runner_command() -> String {
    "bundle exec rspec".to_string()
}

fn default_runner_args() -> Vec<String> {
    vec![
        "--format".to_string(),
        "json".to_string(),
        "--no-profile".to_string(),
    ]
}

fn default_provisioner_command() -> String {
    "bin/rake".to_string()
}

fn default_provisioner_task() -> String {
    "db:{action}".to_string()
}

fn default_provisioner_env() -> BTreeMap<String, String> {
    BTreeMap::from([("RAILS_ENV".to_string(), "test".to_string())])
}

/// Parses a configuration file.
/// 解析配置文件。
pub fn load_config(path: &Path) -> Result<SplitterConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Loads `path` when it exists. A missing file falls back to the built-in defaults unless
/// the user named it explicitly.
///
/// 当 `path` 存在时加载它。若文件不存在，除非用户显式指定，否则使用内置默认值。
pub fn resolve_config(path: &Path, explicit: bool) -> Result<SplitterConfig> {
    if !explicit && !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(SplitterConfig::default());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: SplitterConfig = toml::from_str("").unwrap();
        assert_eq!(config, SplitterConfig::default());
        assert_eq!(config.groups, 10);
        assert_eq!(config.slot_env, "DATABASE_NUMBER");
        assert_eq!(config.provisioner.task_for("migrate"), "db:migrate");
    }

    #[test]
    fn groups_must_fit_in_slots() {
        let config = SplitterConfig {
            groups: 11,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SplitError::InvalidGroupCount { requested: 11, max: 10 })
        ));
    }
}
