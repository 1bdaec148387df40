//! # Concurrent Execution Engine / 并发执行引擎
//!
//! Fans every execution group out to its own worker task, bound to the group's slot,
//! and fans the decoded results back in through one channel drained by the
//! [`Aggregator`]. A single failed decode or an interruption aborts every worker
//! that is still running.
//!
//! 将每个执行分组分发给绑定到其槽位的独立工作者任务，并通过由 [`Aggregator`]
//! 消费的单一通道汇聚解码后的结果。任一解码失败或中断都会中止所有仍在运行的工作者。

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

use crate::core::aggregate::Aggregator;
use crate::core::config::SplitterConfig;
use crate::core::decode::decode_run_result;
use crate::core::error::SplitError;
use crate::core::models::{AggregateResult, ExecutionGroup, GroupReport};
use crate::infra::command::{build_command, spawn_and_capture};

/// The collaborator that actually runs a group of anchors.
///
/// Implementations return the raw stdout of the run. Exit status is deliberately not part
/// of the contract: failing examples make the framework exit non-zero, and that is data.
///
/// 实际运行一组锚点的协作者。实现返回运行的原始 stdout，退出状态不属于该约定。
pub trait TestRunner: Send + Sync + 'static {
    fn run_group(
        &self,
        group: &ExecutionGroup,
    ) -> impl Future<Output = Result<Vec<u8>, SplitError>> + Send;
}

/// Runs groups through an external command, e.g. `bundle exec rspec <anchors> --format json`,
/// with the slot number exported in the configured environment variable.
///
/// 通过外部命令运行分组，并通过配置的环境变量导出槽位编号。
#[derive(Debug, Clone)]
pub struct CommandRunner {
    command: String,
    args: Vec<String>,
    slot_env: String,
}

impl CommandRunner {
    pub fn new(command: impl Into<String>, args: Vec<String>, slot_env: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args,
            slot_env: slot_env.into(),
        }
    }

    pub fn from_config(config: &SplitterConfig) -> Self {
        Self::new(
            config.runner.command.clone(),
            config.runner.args.clone(),
            config.slot_env.clone(),
        )
    }
}

impl TestRunner for CommandRunner {
    async fn run_group(&self, group: &ExecutionGroup) -> Result<Vec<u8>, SplitError> {
        let slot = group.slot;
        let mut cmd = build_command(&self.command)
            .map_err(|e| SplitError::Config(format!("runner.command: {e:#}")))?;
        let anchors = group.runner_args();
        tracing::debug!(slot, ?anchors, "starting test runner");
        cmd.args(&anchors)
            .args(&self.args)
            .env(&self.slot_env, slot.to_string());

        let output = spawn_and_capture(cmd)
            .await
            .map_err(|source| SplitError::RunnerSpawn { slot, source })?;

        if !output.status.success() {
            tracing::debug!(slot, status = %output.status, "test runner exited unsuccessfully");
        }
        if !output.stderr.trim().is_empty() {
            tracing::debug!(slot, stderr = %output.stderr.trim_end(), "test runner stderr");
        }
        Ok(output.stdout)
    }
}

/// Runs one group to completion and decodes its output.
/// A panic inside the runner is turned into an error report for that slot.
///
/// 运行一个分组直至完成并解码其输出。运行器内部的 panic 会被转换为该槽位的错误报告。
async fn run_worker<R: TestRunner>(runner: &R, group: &ExecutionGroup) -> Result<GroupReport, SplitError> {
    let slot = group.slot;
    let started = Instant::now();
    let raw = AssertUnwindSafe(runner.run_group(group))
        .catch_unwind()
        .await
        .map_err(|panic| SplitError::Worker {
            slot,
            reason: panic_message(panic.as_ref()),
        })??;
    let result = decode_run_result(&raw, slot)?;
    Ok(GroupReport {
        slot,
        result,
        elapsed: started.elapsed(),
    })
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

/// Executes every group concurrently and merges the results.
///
/// Each group gets one worker bound to `group.slot`; slots are fixed by the planner before
/// anything starts, so no two live workers share one. `on_report` sees every report in
/// arrival order, just before it is merged.
///
/// # Arguments
/// * `groups` - The planned groups, each with a distinct slot
/// * `runner` - The collaborator that runs one group
/// * `cancel` - Cancelled on Ctrl-C; the run then fails with [`SplitError::Interrupted`]
/// * `on_report` - Progress callback, called on the coordinating task
///
/// # Returns
/// The merged result of all groups, or the first fatal error
///
/// 并发执行所有分组并合并结果。
pub async fn execute_groups<R, F>(
    groups: Vec<ExecutionGroup>,
    runner: Arc<R>,
    cancel: &CancellationToken,
    mut on_report: F,
) -> Result<AggregateResult, SplitError>
where
    R: TestRunner,
    F: FnMut(&GroupReport),
{
    let (tx, rx) = mpsc::channel(groups.len().max(1));
    let mut workers = JoinSet::new();

    for group in groups {
        let tx = tx.clone();
        let runner = Arc::clone(&runner);
        workers.spawn(async move {
            let report = run_worker(runner.as_ref(), &group).await;
            // The receiver only disappears once the run has already been aborted.
            let _ = tx.send(report).await;
        });
    }
    // The channel closes once every worker has dropped its sender.
    drop(tx);

    let drained = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SplitError::Interrupted),
        merged = Aggregator::new().drain(ReceiverStream::new(rx), &mut on_report) => merged,
    };

    match drained {
        Ok(merged) => {
            while let Some(joined) = workers.join_next().await {
                if let Err(e) = joined {
                    tracing::warn!(error = %e, "worker task ended abnormally");
                }
            }
            Ok(merged)
        }
        Err(e) => {
            // Dropping the set would abort too; doing it explicitly kills the children now.
            workers.abort_all();
            Err(e)
        }
    }
}
