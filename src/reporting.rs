//! # Reporting Module / 报告模块
//!
//! This module renders the merged run: a colored console report with failure listings,
//! a summary line and a failure index, plus optional HTML and JSON files.
//!
//! 此模块渲染合并后的运行结果：包含失败列表、摘要行和失败索引的彩色控制台报告，
//! 以及可选的 HTML 和 JSON 文件。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::{print_plan, print_report};
pub use html::generate_html_report;
pub use json::generate_json_report;
