//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command: it discovers spec files, plans the
//! rotating split, runs every group concurrently against its own slot and prints
//! the merged report.
//!
//! 此模块实现 `run` 命令：发现规格文件、规划轮转拆分、让每个分组在各自的槽位上
//! 并发运行，并打印合并后的报告。
//!
//! ## Execution Flow / 执行流程
//!
//! 1. **Discovery**: Expand files and directories into an ordered list of spec files
//! 2. **Sharding**: Keep this CI runner's share of the files, if requested
//! 3. **Planning**: Locate anchors and distribute them over the groups
//! 4. **Execution**: One worker per group, results merged as they arrive
//! 5. **Reporting**: Console report plus optional HTML and JSON files
//!
//! 1. **发现**: 将文件和目录展开为有序的规格文件列表
//! 2. **分片**: 如有要求，仅保留当前 CI 运行器负责的文件
//! 3. **规划**: 定位锚点并将其分配到各分组
//! 4. **执行**: 每个分组一个工作者，结果按到达顺序合并
//! 5. **报告**: 控制台报告以及可选的 HTML 和 JSON 文件

use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::core::config::SplitterConfig;
use crate::core::execution::{CommandRunner, execute_groups};
use crate::core::locator::load_spec_files;
use crate::core::models::AggregateResult;
use crate::core::planner::{plan_execution, shard};
use crate::infra::fs::discover_spec_files;
use crate::infra::t;
use crate::reporting::{generate_html_report, generate_json_report, print_plan, print_report};

/// Everything the `run` command needs besides the configuration.
/// `run` 命令除配置之外所需的全部参数。
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Files and directories given on the command line.
    pub paths: Vec<PathBuf>,
    /// Overrides `groups` from the configuration.
    pub groups: Option<usize>,
    pub total_runners: Option<usize>,
    pub runner_index: Option<usize>,
    pub dry_run: bool,
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Executes the `run` command.
///
/// # Arguments / 参数
/// * `options` - Paths and flags from the command line
///               来自命令行的路径和标志
/// * `config` - The resolved configuration
///              已解析的配置
/// * `locale` - The language locale to use for messages
///              用于消息的语言区域设置
///
/// # Returns / 返回值
/// `Ok(())` once the report is printed, whatever the test outcome. Only environment
/// errors, decode errors and interruption are returned as errors.
///
/// 报告打印完成后返回 `Ok(())`，与测试结果无关。只有环境错误、解码错误和中断才会作为错误返回。
pub async fn execute(options: RunOptions, mut config: SplitterConfig, locale: &str) -> Result<()> {
    if let Some(groups) = options.groups {
        config.groups = groups;
    }
    config.validate()?;

    let discovered = discover_spec_files(&options.paths)?;
    let total_discovered = discovered.len();
    let spec_paths = shard(discovered, options.total_runners, options.runner_index)?;
    if let (Some(total), Some(index)) = (options.total_runners, options.runner_index) {
        println!(
            "{}",
            t!(
                "run.sharding",
                locale = locale,
                index = index + 1,
                total = total,
                count = spec_paths.len(),
                discovered = total_discovered
            )
            .cyan()
        );
    }

    let files = load_spec_files(&spec_paths)?;
    let plan = plan_execution(&files, config.groups)?;
    tracing::info!(
        files = plan.file_count,
        anchors = plan.anchor_count,
        groups = plan.groups.len(),
        "execution plan ready"
    );

    if plan.is_empty() {
        println!("{}", t!("run.no_examples", locale = locale).yellow());
        return Ok(());
    }

    println!(
        "{}",
        t!(
            "run.plan_summary",
            locale = locale,
            files = plan.file_count,
            anchors = plan.anchor_count,
            groups = plan.groups.len()
        )
        .bold()
    );

    if options.dry_run {
        print_plan(&plan, locale);
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let interrupt = spawn_interrupt_handler(cancel.clone(), locale);
    let runner = Arc::new(CommandRunner::from_config(&config));
    let started = Instant::now();

    let merged = execute_groups(plan.groups, runner, &cancel, |report| {
        println!("{}", t!("run.group_complete", locale = locale, slot = report.slot));
        tracing::debug!(
            slot = report.slot,
            examples = report.result.summary.example_count,
            elapsed = ?report.elapsed,
            "group merged"
        );
    })
    .await;
    interrupt.abort();
    let merged = merged?;

    print_report(&merged, started.elapsed(), locale);
    write_reports(&merged, &options, locale);
    Ok(())
}

/// Cancels `token` on the first Ctrl-C.
fn spawn_interrupt_handler(token: CancellationToken, locale: &str) -> tokio::task::JoinHandle<()> {
    let message = t!("run.interrupt_received", locale = locale).to_string();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                eprintln!("\n{}", message.yellow());
                token.cancel();
            }
            Err(e) => tracing::warn!(error = %e, "failed to listen for Ctrl-C"),
        }
    })
}

/// Writes the optional report files. Failures only produce warnings.
/// 写出可选的报告文件。失败只会产生警告。
fn write_reports(result: &AggregateResult, options: &RunOptions, locale: &str) {
    if let Some(path) = &options.html {
        report_written(generate_html_report(result, path, locale), path, locale);
    }
    if let Some(path) = &options.json {
        report_written(
            generate_json_report(result, path)
                .with_context(|| t!("run.json_report_failed", locale = locale).to_string()),
            path,
            locale,
        );
    }
}

fn report_written(outcome: Result<()>, path: &std::path::Path, locale: &str) {
    match outcome {
        Ok(()) => println!(
            "{}",
            t!("run.report_written", locale = locale, path = path.display()).green()
        ),
        Err(e) => eprintln!(
            "{} {e:#}",
            t!("run.report_failed", locale = locale).yellow()
        ),
    }
}
