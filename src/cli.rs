//! # Command Line Interface / 命令行接口
//!
//! Builds the clap command tree and dispatches to the command modules. `run` is the
//! default action, so `spec-splitter spec/models` and `spec-splitter run spec/models`
//! are the same invocation.
//!
//! 构建 clap 命令树并分发到各命令模块。`run` 是默认操作，因此
//! `spec-splitter spec/models` 与 `spec-splitter run spec/models` 等价。

use anyhow::{Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::cli::commands::{init::InitOptions, run::RunOptions};
use crate::core::config::{DEFAULT_CONFIG_FILE, resolve_config};
use crate::infra::logging::init_logging;
use crate::infra::provision::DbAction;
use crate::infra::t;
use crate::resolve_locale;

pub mod commands;

/// Finds `--lang <VALUE>` (or `--lang=VALUE`) before clap runs, so the help text
/// itself can be localized.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang="))
        .map(str::to_string)
}

/// Arguments shared by the implicit top-level run and the explicit `run` subcommand.
fn with_run_args(cmd: Command, locale: &str) -> Command {
    cmd.arg(
        Arg::new("paths")
            .help(t!("cli.arg_paths", locale = locale).to_string())
            .value_name("PATHS")
            .num_args(0..)
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Append),
    )
    .arg(
        Arg::new("groups")
            .short('g')
            .long("groups")
            .help(t!("cli.arg_groups", locale = locale).to_string())
            .value_name("GROUPS")
            .value_parser(clap::value_parser!(usize))
            .action(ArgAction::Set),
    )
    .arg(
        Arg::new("total-runners")
            .long("total-runners")
            .help(t!("cli.arg_total_runners", locale = locale).to_string())
            .value_name("TOTAL_RUNNERS")
            .value_parser(clap::value_parser!(usize))
            .action(ArgAction::Set)
            .requires("runner-index"),
    )
    .arg(
        Arg::new("runner-index")
            .long("runner-index")
            .help(t!("cli.arg_runner_index", locale = locale).to_string())
            .value_name("RUNNER_INDEX")
            .value_parser(clap::value_parser!(usize))
            .action(ArgAction::Set)
            .requires("total-runners"),
    )
    .arg(
        Arg::new("dry-run")
            .long("dry-run")
            .help(t!("cli.arg_dry_run", locale = locale).to_string())
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("html")
            .long("html")
            .help(t!("cli.arg_html", locale = locale).to_string())
            .value_name("HTML")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
    )
    .arg(
        Arg::new("json")
            .long("json")
            .help(t!("cli.arg_json", locale = locale).to_string())
            .value_name("JSON")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
    )
}

/// Builds the command tree with help texts in `locale`.
/// 使用 `locale` 语言的帮助文本构建命令树。
pub fn build_cli(locale: &str) -> Command {
    let root = Command::new("spec-splitter")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about", locale = locale).to_string())
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.arg_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("cli.arg_config", locale = locale).to_string())
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("cli.arg_verbose", locale = locale).to_string())
                .global(true)
                .action(ArgAction::SetTrue),
        );

    with_run_args(root, locale)
        .subcommand(with_run_args(
            Command::new("run").about(t!("cli.cmd_run_about", locale = locale).to_string()),
            locale,
        ))
        .subcommand(Command::new("create").about(t!("cli.cmd_create_about", locale = locale).to_string()))
        .subcommand(Command::new("migrate").about(t!("cli.cmd_migrate_about", locale = locale).to_string()))
        .subcommand(
            Command::new("init")
                .about(t!("cli.cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("cli.arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("cli.arg_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn run_options(matches: &ArgMatches) -> RunOptions {
    RunOptions {
        paths: matches
            .get_many::<PathBuf>("paths")
            .map(|paths| paths.cloned().collect())
            .unwrap_or_default(),
        groups: matches.get_one::<usize>("groups").copied(),
        total_runners: matches.get_one::<usize>("total-runners").copied(),
        runner_index: matches.get_one::<usize>("runner-index").copied(),
        dry_run: matches.get_flag("dry-run"),
        html: matches.get_one::<PathBuf>("html").cloned(),
        json: matches.get_one::<PathBuf>("json").cloned(),
    }
}

/// Parses the command line and runs the selected command.
///
/// # Returns / 返回值
/// `Ok(())` on normal completion, including runs with failing examples.
/// 正常完成时返回 `Ok(())`，包括存在失败示例的运行。
pub async fn run() -> Result<()> {
    let requested_lang = pre_parse_language();
    let help_locale = resolve_locale(requested_lang.as_deref());
    rust_i18n::set_locale(help_locale);

    let matches = build_cli(help_locale).get_matches();
    init_logging(matches.get_flag("verbose"));

    let explicit_config = matches.get_one::<PathBuf>("config").cloned();
    let config_path = explicit_config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    if let Some(("init", init_matches)) = matches.subcommand() {
        if requested_lang.is_none() {
            println!(
                "{}",
                t!("cli.system_language_detected", locale = help_locale, lang = help_locale)
            );
        }
        return commands::init::run_init_wizard(
            InitOptions {
                output: &config_path,
                non_interactive: init_matches.get_flag("non-interactive"),
                force: init_matches.get_flag("force"),
            },
            help_locale,
        );
    }

    let config = resolve_config(&config_path, explicit_config.is_some())?;
    let language = matches
        .get_one::<String>("lang")
        .map(String::as_str)
        .or(config.language.as_deref());
    let locale = resolve_locale(language);
    rust_i18n::set_locale(locale);
    tracing::debug!(locale, config = %config_path.display(), "configuration resolved");

    match matches.subcommand() {
        Some(("create", _)) => commands::db::execute(DbAction::Create, config, locale).await,
        Some(("migrate", _)) => commands::db::execute(DbAction::Migrate, config, locale).await,
        Some(("run", run_matches)) => execute_run(run_options(run_matches), config, locale).await,
        _ => execute_run(run_options(&matches), config, locale).await,
    }
}

async fn execute_run(
    options: RunOptions,
    config: crate::core::config::SplitterConfig,
    locale: &str,
) -> Result<()> {
    if options.paths.is_empty() {
        bail!(t!("cli.no_paths", locale = locale).to_string());
    }
    commands::run::execute(options, config, locale).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        build_cli("en").debug_assert();
    }

    #[test]
    fn top_level_paths_mean_run() {
        let matches = build_cli("en")
            .try_get_matches_from(["spec-splitter", "-g", "3", "spec/a_spec.rb", "spec/models"])
            .unwrap();
        assert!(matches.subcommand().is_none());
        let options = run_options(&matches);
        assert_eq!(options.groups, Some(3));
        assert_eq!(options.paths.len(), 2);
    }

    #[test]
    fn sharding_flags_come_in_pairs() {
        let result = build_cli("en").try_get_matches_from([
            "spec-splitter",
            "run",
            "--total-runners",
            "2",
            "spec",
        ]);
        assert!(result.is_err());
    }
}
