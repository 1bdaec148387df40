//! # Console Reporting Module / 控制台报告模块
//!
//! This module renders the merged result in the console: the enumerated failures,
//! the elapsed time, a colored summary line and an index of failed examples that can
//! be pasted back into a shell.
//!
//! 此模块在控制台中渲染合并后的结果：编号的失败列表、耗时、彩色摘要行，
//! 以及可以直接粘贴回 shell 的失败示例索引。

use colored::*;
use std::fmt::Write;
use std::time::Duration;

use crate::core::models::{AggregateResult, Example, Outcome, Summary};
use crate::core::planner::ExecutionPlan;
use crate::infra::t;

/// Maps an outcome to the color of its summary line.
/// 将结果映射为其摘要行的颜色。
pub fn outcome_color(outcome: Outcome) -> Color {
    match outcome {
        Outcome::Failed => Color::Red,
        Outcome::Pending => Color::Yellow,
        Outcome::Passed => Color::Green,
    }
}

/// Renders every failed example as a numbered entry.
///
/// # Output Format / 输出格式
/// ```text
///
///  1) User#name returns the full name
///     failed
///     expected "Ada Lovelace", got "Ada"
///   ./spec/models/user_spec.rb:12
/// ```
pub fn format_failures(result: &AggregateResult) -> String {
    let mut out = String::new();
    for (i, example) in result.failed_examples().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, " {}) {}", i + 1, example.full_description);
        let _ = writeln!(out, "    {}", example.status.as_str().red());
        let _ = writeln!(out, "    {}", example.exception_message().red());
        let _ = writeln!(out, "  {}", example.location().cyan());
    }
    out
}

/// Renders the count line, colored by the overall outcome.
/// 渲染计数行，并按整体结果着色。
pub fn format_summary_line(summary: &Summary, locale: &str) -> String {
    t!(
        "report.summary_line",
        locale = locale,
        examples = summary.example_count,
        failures = summary.failure_count,
        pending = summary.pending_count,
        errors = summary.errors_outside_of_examples_count
    )
    .color(outcome_color(summary.outcome()))
    .to_string()
}

fn format_index_entry(example: &Example) -> String {
    format!(
        "{} {}",
        format!("rspec {}", example.location()).red(),
        format!("# {}", example.full_description).cyan()
    )
}

/// Renders the compact failure index, or nothing when every example passed.
/// 渲染紧凑的失败索引；若所有示例都通过则不输出任何内容。
pub fn format_failure_index(result: &AggregateResult, locale: &str) -> String {
    let mut out = String::new();
    for (i, example) in result.failed_examples().enumerate() {
        if i == 0 {
            let _ = writeln!(out, "{}", t!("report.failed_examples", locale = locale).bold());
        }
        let _ = writeln!(out, "{}", format_index_entry(example));
    }
    out
}

/// Prints the complete end-of-run report.
///
/// 打印完整的运行结束报告。
///
/// # Arguments / 参数
/// * `result` - The merged result of every group
///              所有分组合并后的结果
/// * `elapsed` - Wall time of the execution phase
///               执行阶段的实际耗时
/// * `locale` - The language locale to use for messages
///              用于消息的语言区域设置
pub fn print_report(result: &AggregateResult, elapsed: Duration, locale: &str) {
    print!("{}", format_failures(result));
    println!();
    println!(
        "{}",
        t!("report.finished_in", locale = locale, elapsed = format!("{:.2?}", elapsed))
    );
    println!("{}", format_summary_line(&result.summary, locale));
    let index = format_failure_index(result, locale);
    if !index.is_empty() {
        println!();
        print!("{index}");
    }
}

/// Prints the plan without running it (`--dry-run`).
/// 打印执行计划而不运行（`--dry-run`）。
pub fn print_plan(plan: &ExecutionPlan, locale: &str) {
    println!("{}", t!("plan.banner", locale = locale).bold());
    for group in &plan.groups {
        println!(
            "  - {:<8} | {:>5} {}",
            t!("plan.slot", locale = locale, slot = group.slot).cyan(),
            group.anchor_count(),
            group.runner_args().join(" ")
        );
    }
}
