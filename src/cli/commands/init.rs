//! # Config Initialization Module / 配置初始化模块
//!
//! This module implements the `init` command, which writes a starter
//! `SpecSplitter.toml` either from defaults or through a short interactive wizard.
//!
//! 此模块实现 `init` 命令，它通过默认值或简短的交互式向导写出初始的
//! `SpecSplitter.toml`。
//!
//! ## Features / 功能特性
//!
//! - **Interactive Wizard**: Prompts for the runner command, group count and slot variable
//! - **Project Detection**: Suggests `bundle exec rspec` when a `Gemfile` is present
//! - **Overwrite Protection**: Confirmation (or `--force`) before replacing an existing file
//!
//! - **交互式向导**: 提示输入运行器命令、分组数量和槽位变量
//! - **项目检测**: 存在 `Gemfile` 时建议使用 `bundle exec rspec`
//! - **覆盖保护**: 替换现有文件前需要确认（或 `--force`）

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::fs;
use std::path::Path;

use crate::core::config::{RunnerConfig, SplitterConfig};
use crate::infra::t;

const CONFIG_HEADER: &str = "# spec-splitter configuration
# The runner receives `<command> <path:line:line>... <args>` with the slot number
# exported in `slot_env`. `provisioner.task` is run once per slot for `create`/`migrate`.
";

/// Options of the `init` command.
#[derive(Debug, Clone)]
pub struct InitOptions<'a> {
    pub output: &'a Path,
    pub non_interactive: bool,
    pub force: bool,
}

/// Runs the wizard (or writes defaults) and saves the configuration.
///
/// 运行向导（或写入默认值）并保存配置。
pub fn run_init_wizard(options: InitOptions<'_>, language: &str) -> Result<()> {
    let path = options.output;
    let theme = ColorfulTheme::default();

    if path.exists() && !options.force {
        if options.non_interactive {
            println!(
                "{}",
                t!("init.file_exists", locale = language, path = path.display()).red()
            );
            println!("{}", t!("init.use_force", locale = language).yellow());
            return Ok(());
        }
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init.overwrite_prompt", locale = language, path = path.display()))
            .default(false)
            .interact()
            .context(t!("init.confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init.aborted", locale = language));
            return Ok(());
        }
    }

    let mut config = default_config(Path::new("."));

    if !options.non_interactive {
        println!("\n{}", t!("init.welcome", locale = language).cyan().bold());

        config.runner.command = Input::with_theme(&theme)
            .with_prompt(t!("init.runner_prompt", locale = language))
            .default(config.runner.command.clone())
            .interact_text()?;
        config.groups = Input::with_theme(&theme)
            .with_prompt(t!("init.groups_prompt", locale = language))
            .default(config.groups)
            .interact_text()?;
        config.slots = config.slots.max(config.groups);
        config.slot_env = Input::with_theme(&theme)
            .with_prompt(t!("init.slot_env_prompt", locale = language))
            .default(config.slot_env.clone())
            .interact_text()?;
        config.language = Some(language.to_string());
    }

    config.validate()?;
    write_config(path, &config, language)
}

/// Builds the default configuration for the project in `dir`.
/// 为 `dir` 中的项目构建默认配置。
pub fn default_config(dir: &Path) -> SplitterConfig {
    SplitterConfig {
        runner: RunnerConfig {
            command: detect_runner_command(dir).to_string(),
            ..RunnerConfig::default()
        },
        ..SplitterConfig::default()
    }
}

/// Bundled projects run the framework through Bundler.
fn detect_runner_command(dir: &Path) -> &'static str {
    if dir.join("Gemfile").exists() {
        "bundle exec rspec"
    } else {
        "rspec"
    }
}

fn write_config(path: &Path, config: &SplitterConfig, language: &str) -> Result<()> {
    let body = toml::to_string_pretty(config)
        .context(t!("init.serialize_failed", locale = language).to_string())?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            t!("init.create_parent_dir_failed", locale = language, path = parent.display()).to_string()
        })?;
    }

    fs::write(path, format!("{CONFIG_HEADER}\n{body}")).with_context(|| {
        t!("init.write_failed", locale = language, path = path.display()).to_string()
    })?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init.success", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init.next_steps", locale = language));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemfile_switches_to_bundler() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(detect_runner_command(dir.path()), "rspec");
        fs::write(dir.path().join("Gemfile"), "source 'https://rubygems.org'\n").unwrap();
        assert_eq!(detect_runner_command(dir.path()), "bundle exec rspec");
    }

    #[test]
    fn written_config_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/SpecSplitter.toml");
        let config = default_config(dir.path());
        write_config(&path, &config, "en").unwrap();
        let parsed = crate::core::config::load_config(&path).unwrap();
        assert_eq!(parsed, config);
    }
}
