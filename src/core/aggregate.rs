//! # Aggregator / 聚合器
//!
//! The single consumer of the fan-in channel. It owns the [`AggregateResult`] outright,
//! so merging needs no locks: workers only ever hand over finished reports.
//!
//! 汇聚通道的唯一消费者。它独占 [`AggregateResult`]，因此合并无需加锁：
//! 工作者只会移交已完成的报告。

use futures::{Stream, StreamExt};

use crate::core::error::SplitError;
use crate::core::models::{AggregateResult, GroupReport, RunResult};

#[derive(Debug, Default)]
pub struct Aggregator {
    result: AggregateResult,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the examples of `run` and adds its summary counts.
    /// 追加 `run` 的示例并累加其摘要计数。
    pub fn merge(&mut self, run: RunResult) {
        self.result.merge(run);
    }

    pub fn finish(self) -> AggregateResult {
        self.result
    }

    /// Merges reports in arrival order until the stream ends.
    ///
    /// The first error stops the drain and is returned as-is; whatever was merged so far is
    /// dropped, since a partial aggregate is never reported.
    ///
    /// 按到达顺序合并报告直到流结束。遇到第一个错误即停止并原样返回。
    pub async fn drain<S, F>(mut self, reports: S, mut on_report: F) -> Result<AggregateResult, SplitError>
    where
        S: Stream<Item = Result<GroupReport, SplitError>>,
        F: FnMut(&GroupReport),
    {
        futures::pin_mut!(reports);
        while let Some(report) = reports.next().await {
            let report = report?;
            on_report(&report);
            self.merge(report.result);
        }
        Ok(self.finish())
    }
}
