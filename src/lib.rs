//! # Spec Splitter Library / Spec Splitter 库
//!
//! This library splits an RSpec suite into rotating execution groups and runs every
//! group concurrently against its own isolated database slot, merging the JSON
//! results into one report.
//!
//! 此库将 RSpec 套件拆分为轮转执行分组，让每个分组在各自隔离的数据库槽位上并发运行，
//! 并将 JSON 结果合并为一份报告。
//!
//! ## Modules / 模块
//!
//! - `core` - Anchor location, partitioning, execution engine and aggregation
//! - `infra` - Process spawning, spec discovery, provisioning and logging
//! - `reporting` - Console, HTML and JSON reports
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 锚点定位、分区、执行引擎与聚合
//! - `infra` - 进程启动、规格发现、数据库准备与日志
//! - `reporting` - 控制台、HTML 和 JSON 报告
//! - `cli` - 命令行接口和命令

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::models;
pub use crate::core::{SplitError, execute_groups};

/// Locales shipped in `locales/`.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "zh-CN"];

/// Picks the message locale.
///
/// `requested` (from `--lang` or the config file) wins when given; otherwise the system
/// locale is detected. The full tag is matched first (e.g. "zh-CN"), then only the
/// language part (e.g. "zh" from "zh-TW"), and finally "en".
///
/// 选择消息语言。优先使用 `requested`（来自 `--lang` 或配置文件），否则检测系统语言。
/// 先匹配完整标签，再匹配语言部分，最后回退到 "en"。
pub fn resolve_locale(requested: Option<&str>) -> &'static str {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());

    if let Some(exact) = SUPPORTED_LOCALES
        .iter()
        .find(|l| l.eq_ignore_ascii_case(&locale))
    {
        return exact;
    }
    let language = locale.split(['-', '_']).next().unwrap_or_default();
    SUPPORTED_LOCALES
        .iter()
        .find(|l| {
            l.split('-')
                .next()
                .is_some_and(|code| code.eq_ignore_ascii_case(language))
        })
        .copied()
        .unwrap_or("en")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_matching() {
        assert_eq!(resolve_locale(Some("en")), "en");
        assert_eq!(resolve_locale(Some("zh-cn")), "zh-CN");
        assert_eq!(resolve_locale(Some("zh_TW")), "zh-CN");
        assert_eq!(resolve_locale(Some("en-GB")), "en");
        assert_eq!(resolve_locale(Some("fr-FR")), "en");
    }
}
