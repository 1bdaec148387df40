//! # JSON Reporting Module / JSON 报告模块
//!
//! Writes the merged result in the same document shape the test runner emits, so tools
//! that already read the runner's JSON output can read the combined run as well.
//!
//! 以与测试运行器相同的文档结构写出合并结果，使已能读取运行器 JSON 输出的工具也能读取合并后的运行结果。

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::models::AggregateResult;

/// Serializes the aggregate as a pretty-printed runner document.
pub fn render_json_report(result: &AggregateResult) -> Result<String> {
    serde_json::to_string_pretty(&result.to_run_result()).context("Failed to serialize JSON report")
}

/// Writes the JSON report to `output_path`.
/// 将 JSON 报告写入 `output_path`。
pub fn generate_json_report(result: &AggregateResult, output_path: &Path) -> Result<()> {
    let json = render_json_report(result)?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report: {}", output_path.display()))
}
