//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the splitter.
//! It includes the work units produced by the partitioner (anchors, file groups,
//! execution groups) and the wire model of the test runner's JSON results.
//!
//! 此模块定义了整个拆分器中使用的核心数据结构。
//! 它包括分区器产生的工作单元（锚点、文件分组、执行分组）以及测试运行器 JSON 结果的数据模型。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A spec file and the 1-indexed lines on which its runnable examples start.
/// 一个规格文件及其可运行示例起始的行号（从 1 开始）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFile {
    pub path: PathBuf,
    /// Ascending, in file order. Never mutated after discovery.
    /// 按文件顺序升序排列。发现后不再修改。
    pub anchors: Vec<u32>,
}

impl SpecFile {
    pub fn new(path: impl Into<PathBuf>, anchors: Vec<u32>) -> Self {
        Self {
            path: path.into(),
            anchors,
        }
    }
}

/// One runnable example: a spec file path plus the line its declaration sits on.
/// 一个可运行的示例：规格文件路径加上其声明所在的行。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorRef {
    pub path: PathBuf,
    pub line: u32,
}

impl fmt::Display for AnchorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// The anchors of a single file that landed in the same per-file rotation bucket.
/// 单个文件中落入同一轮转桶的锚点集合。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub path: PathBuf,
    pub lines: Vec<u32>,
}

impl FileGroup {
    pub fn new(path: &Path, first_line: u32) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: vec![first_line],
        }
    }

    /// Renders the group in the runner's `path:line:line` argument form.
    /// 以运行器的 `path:line:line` 参数形式渲染该分组。
    pub fn to_arg(&self) -> String {
        let mut arg = self.path.display().to_string();
        for line in &self.lines {
            arg.push(':');
            arg.push_str(&line.to_string());
        }
        arg
    }

    pub fn anchors(&self) -> impl Iterator<Item = AnchorRef> + '_ {
        self.lines.iter().map(|&line| AnchorRef {
            path: self.path.clone(),
            line,
        })
    }
}

/// A bundle of anchors executed by one worker against one resource slot.
/// 由一个工作者针对一个资源槽执行的一组锚点。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionGroup {
    /// Index of the isolated database instance this group binds to.
    /// 此分组绑定的隔离数据库实例的索引。
    pub slot: usize,
    pub file_groups: Vec<FileGroup>,
}

impl ExecutionGroup {
    pub fn new(slot: usize) -> Self {
        Self {
            slot,
            file_groups: Vec::new(),
        }
    }

    pub fn anchors(&self) -> impl Iterator<Item = AnchorRef> + '_ {
        self.file_groups.iter().flat_map(FileGroup::anchors)
    }

    pub fn anchor_count(&self) -> usize {
        self.file_groups.iter().map(|g| g.lines.len()).sum()
    }

    /// The textual arguments handed to the test runner, one per file group.
    /// 传递给测试运行器的文本参数，每个文件分组一个。
    pub fn runner_args(&self) -> Vec<String> {
        self.file_groups.iter().map(FileGroup::to_arg).collect()
    }
}

/// Outcome of a single example as reported by the test framework.
/// A missing or unrecognized status decodes as `Unknown` rather than failing the run.
///
/// 测试框架报告的单个示例的结果。缺失或无法识别的状态解码为 `Unknown`，不会使运行失败。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleStatus {
    Passed,
    Failed,
    Pending,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ExampleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExampleStatus::Passed => "passed",
            ExampleStatus::Failed => "failed",
            ExampleStatus::Pending => "pending",
            ExampleStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ExampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exception {
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub backtrace: Option<Vec<String>>,
}

/// A single example entry of the runner's JSON output.
/// 运行器 JSON 输出中的单个示例条目。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub status: ExampleStatus,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub line_number: u32,
    #[serde(default)]
    pub run_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<Exception>,
}

impl Example {
    pub fn is_failed(&self) -> bool {
        self.status == ExampleStatus::Failed
    }

    /// `file:line` location of the example.
    pub fn location(&self) -> String {
        format!("{}:{}", self.file_path, self.line_number)
    }

    pub fn exception_message(&self) -> &str {
        self.exception
            .as_ref()
            .map(|e| e.message.as_str())
            .unwrap_or_default()
    }
}

/// Count totals reported by the framework for one run.
/// 框架为一次运行报告的计数汇总。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub duration: f64,
    pub example_count: u64,
    pub failure_count: u64,
    pub pending_count: u64,
    pub errors_outside_of_examples_count: u64,
}

impl AddAssign for Summary {
    fn add_assign(&mut self, other: Self) {
        self.duration += other.duration;
        self.example_count += other.example_count;
        self.failure_count += other.failure_count;
        self.pending_count += other.pending_count;
        self.errors_outside_of_examples_count += other.errors_outside_of_examples_count;
    }
}

/// Overall status of a (merged) result, used to pick the report color.
/// （合并后）结果的整体状态，用于选择报告颜色。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Pending,
    Failed,
}

impl Summary {
    pub fn outcome(&self) -> Outcome {
        if self.failure_count + self.errors_outside_of_examples_count > 0 {
            Outcome::Failed
        } else if self.pending_count > 0 {
            Outcome::Pending
        } else {
            Outcome::Passed
        }
    }
}

/// One worker's decoded outcome.
/// 单个工作者解码后的结果。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunResult {
    pub version: String,
    pub messages: Vec<String>,
    pub seed: u64,
    pub examples: Vec<Example>,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_line: Option<String>,
}

/// What a worker sends back on the fan-in channel once its group is decoded.
/// 工作者在其分组解码完成后通过汇聚通道发回的内容。
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub slot: usize,
    pub result: RunResult,
    pub elapsed: Duration,
}

/// The running merge of every `RunResult` received so far.
/// Only the aggregator that owns it ever mutates it.
///
/// 迄今为止收到的所有 `RunResult` 的累计合并。
/// 只有拥有它的聚合器会修改它。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    pub version: String,
    /// Seed of the first merged group; each group runs with its own seed.
    pub seed: Option<u64>,
    pub messages: Vec<String>,
    pub examples: Vec<Example>,
    pub summary: Summary,
    pub groups_merged: usize,
}

impl AggregateResult {
    pub fn merge(&mut self, other: RunResult) {
        if self.groups_merged == 0 {
            self.version = other.version;
            self.seed = Some(other.seed);
        }
        self.messages.extend(other.messages);
        self.examples.extend(other.examples);
        self.summary += other.summary;
        self.groups_merged += 1;
    }

    pub fn failed_examples(&self) -> impl Iterator<Item = &Example> {
        self.examples.iter().filter(|e| e.is_failed())
    }

    pub fn outcome(&self) -> Outcome {
        self.summary.outcome()
    }

    /// Converts the aggregate back into the runner's JSON document shape.
    /// 将聚合结果转换回运行器的 JSON 文档结构。
    pub fn to_run_result(&self) -> RunResult {
        let s = &self.summary;
        RunResult {
            version: self.version.clone(),
            messages: self.messages.clone(),
            seed: self.seed.unwrap_or_default(),
            examples: self.examples.clone(),
            summary: *s,
            summary_line: Some(format!(
                "{} examples, {} failures, {} pending",
                s.example_count, s.failure_count, s.pending_count
            )),
        }
    }
}
