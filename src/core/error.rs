//! # Engine Errors / 引擎错误
//!
//! Every fatal condition of a run is a `SplitError` value. Nothing in the engine terminates the
//! process; errors travel up to `main`, which is the only place that decides the exit code.
//!
//! 运行中的每个致命条件都是一个 `SplitError` 值。引擎本身不会终止进程；
//! 错误会一路返回到 `main`，只有它决定退出码。

use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of the spec distribution engine and its collaborators.
/// 规格分发引擎及其协作者的致命失败。
#[derive(Debug, Error)]
pub enum SplitError {
    /// A spec file could not be opened or read while locating anchors.
    #[error("failed to read spec file {}: {source}", path.display())]
    SpecRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A command-line path could not be resolved or walked.
    #[error("failed to discover spec files under {}: {reason}", path.display())]
    Discovery { path: PathBuf, reason: String },

    /// The requested group count cannot be scheduled.
    #[error("group count must be between 1 and {max}, got {requested}")]
    InvalidGroupCount { requested: usize, max: usize },

    /// The configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The test runner process for a slot could not be started.
    #[error("failed to start test runner for slot {slot}: {source}")]
    RunnerSpawn {
        slot: usize,
        #[source]
        source: std::io::Error,
    },

    /// A worker's output was not a structured result, even after extraction.
    /// The raw output is part of the message so it can be diagnosed.
    #[error("invalid JSON response from slot {slot}: {source}\n{raw}")]
    Decode {
        slot: usize,
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// Worker output contained no `{ ... }` payload at all.
    #[error("no JSON payload in output from slot {slot}\n{raw}")]
    MissingPayload { slot: usize, raw: String },

    /// A worker task panicked or was torn down before reporting.
    #[error("worker for slot {slot} did not complete: {reason}")]
    Worker { slot: usize, reason: String },

    /// A provisioning action failed for one slot.
    #[error("database {action} failed for slot {slot}: {reason}")]
    Provision {
        action: String,
        slot: usize,
        reason: String,
    },

    /// The run was interrupted with Ctrl-C.
    #[error("run interrupted")]
    Interrupted,
}

impl SplitError {
    /// The slot a failure is attributed to, when there is one.
    pub fn slot(&self) -> Option<usize> {
        match self {
            SplitError::RunnerSpawn { slot, .. }
            | SplitError::Decode { slot, .. }
            | SplitError::MissingPayload { slot, .. }
            | SplitError::Worker { slot, .. }
            | SplitError::Provision { slot, .. } => Some(*slot),
            _ => None,
        }
    }
}
