//! # HTML Reporting Module / HTML 报告模块
//!
//! This module writes the merged result as a standalone HTML page: summary counts,
//! the overall status and one row per example, with the exception and backtrace of
//! failed examples folded under each row.
//!
//! 此模块将合并结果写成独立的 HTML 页面：摘要计数、整体状态以及每个示例一行，
//! 失败示例的异常和回溯折叠在对应行下。

use anyhow::{Context, Result};
use chrono::Local;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;

use crate::core::models::{AggregateResult, Example, ExampleStatus, Outcome};
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2rem; color: #222; }
h1 { font-size: 1.6rem; }
.summary-container { display: flex; gap: 1.5rem; margin: 1rem 0 2rem; }
.summary-item { display: flex; flex-direction: column; align-items: center; }
.summary-item .count { font-size: 1.8rem; font-weight: bold; }
.summary-item .label { color: #666; }
.status-banner { padding: .6rem 1rem; border-radius: 4px; font-weight: bold; color: #fff; }
.outcome-passed { background: #2e7d32; }
.outcome-pending { background: #f9a825; }
.outcome-failed { background: #c62828; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: .4rem .6rem; border-bottom: 1px solid #eee; vertical-align: top; }
.status-passed { color: #2e7d32; }
.status-pending { color: #f9a825; }
.status-failed { color: #c62828; font-weight: bold; }
.status-unknown { color: #666; }
.location { font-family: monospace; white-space: nowrap; }
pre { background: #f6f6f6; padding: .6rem; overflow-x: auto; }
"#;

fn outcome_class(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Passed => "outcome-passed",
        Outcome::Pending => "outcome-pending",
        Outcome::Failed => "outcome-failed",
    }
}

fn status_class(status: ExampleStatus) -> &'static str {
    match status {
        ExampleStatus::Passed => "status-passed",
        ExampleStatus::Pending => "status-pending",
        ExampleStatus::Failed => "status-failed",
        ExampleStatus::Unknown => "status-unknown",
    }
}

fn example_row(example: &Example, locale: &str) -> Markup {
    html! {
        tr {
            td class=(status_class(example.status)) { (example.status.as_str()) }
            td class="location" { (example.location()) }
            td {
                (example.full_description)
                @if let Some(exception) = &example.exception {
                    details {
                        summary { (exception.class) ": " (exception.message) }
                        @if let Some(backtrace) = &exception.backtrace {
                            pre { (backtrace.join("\n")) }
                        }
                    }
                }
                @if let Some(message) = &example.pending_message {
                    div class="status-pending" {
                        (t!("html_report.pending_reason", locale = locale)) ": " (message)
                    }
                }
            }
            td { (format!("{:.3}s", example.run_time)) }
        }
    }
}

/// Renders the report page.
/// Failed examples are listed first, then the rest in arrival order.
///
/// 渲染报告页面。失败示例排在最前，其余按到达顺序排列。
pub fn render_html_report(result: &AggregateResult, locale: &str) -> String {
    let s = &result.summary;
    let generated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let failed = result.examples.iter().filter(|e| e.is_failed());
    let others = result.examples.iter().filter(|e| !e.is_failed());

    let outcome_label = match result.outcome() {
        Outcome::Passed => t!("html_report.outcome.passed", locale = locale),
        Outcome::Pending => t!("html_report.outcome.pending", locale = locale),
        Outcome::Failed => t!("html_report.outcome.failed", locale = locale),
    };

    let markup = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (t!("html_report.title", locale = locale)) }
                style { (maud::PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (t!("html_report.main_header", locale = locale)) }
                p { (t!("html_report.generated_at", locale = locale, time = generated)) }
                div class=(format!("status-banner {}", outcome_class(result.outcome()))) { (outcome_label) }
                div class="summary-container" {
                    div class="summary-item" {
                        span class="count" { (s.example_count) }
                        span class="label" { (t!("html_report.summary.examples", locale = locale)) }
                    }
                    div class="summary-item" {
                        span class="count status-failed" { (s.failure_count) }
                        span class="label" { (t!("html_report.summary.failures", locale = locale)) }
                    }
                    div class="summary-item" {
                        span class="count status-pending" { (s.pending_count) }
                        span class="label" { (t!("html_report.summary.pending", locale = locale)) }
                    }
                    div class="summary-item" {
                        span class="count" { (s.errors_outside_of_examples_count) }
                        span class="label" { (t!("html_report.summary.errors", locale = locale)) }
                    }
                    div class="summary-item" {
                        span class="count" { (result.groups_merged) }
                        span class="label" { (t!("html_report.summary.groups", locale = locale)) }
                    }
                }
                table {
                    thead {
                        tr {
                            th { (t!("html_report.table.status", locale = locale)) }
                            th { (t!("html_report.table.location", locale = locale)) }
                            th { (t!("html_report.table.description", locale = locale)) }
                            th { (t!("html_report.table.run_time", locale = locale)) }
                        }
                    }
                    tbody {
                        @for example in failed.chain(others) {
                            (example_row(example, locale))
                        }
                    }
                }
            }
        }
    };
    markup.into_string()
}

/// Writes the HTML report to `output_path`.
///
/// # Errors / 错误
/// Returns an error if the file cannot be written.
/// 如果无法写入文件则返回错误。
pub fn generate_html_report(result: &AggregateResult, output_path: &Path, locale: &str) -> Result<()> {
    fs::write(output_path, render_html_report(result, locale))
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))
}
