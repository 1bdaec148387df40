//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the splitter,
//! including command execution, spec discovery, database provisioning,
//! diagnostic logging and i18n support.
//!
//! 此模块为拆分器提供基础设施服务，
//! 包括命令执行、规格发现、数据库准备、诊断日志和国际化支持。

pub mod command;
pub mod fs;
pub mod logging;
pub mod provision;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
