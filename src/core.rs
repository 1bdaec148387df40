//! # Core Module / 核心模块
//!
//! This module contains the spec distribution and parallel execution engine:
//! anchor location, rotating partitioning, concurrent execution, result decoding
//! and aggregation.
//!
//! 此模块包含规格分发与并行执行引擎：
//! 锚点定位、轮转分区、并发执行、结果解码与聚合。

pub mod aggregate;
pub mod config;
pub mod decode;
pub mod error;
pub mod execution;
pub mod locator;
pub mod models;
pub mod planner;

// Re-exports
pub use error::SplitError;
pub use execution::{CommandRunner, TestRunner, execute_groups};
pub use models::{AggregateResult, ExecutionGroup, RunResult};
