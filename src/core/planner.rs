//! # Execution Planner Module / 执行计划模块
//!
//! This module distributes the anchors of a spec suite into execution groups
//! with a two-level rotating split, and optionally shards the suite across
//! several CI runners before that.
//!
//! 此模块通过两级轮转拆分将规格套件的锚点分配到执行分组中，
//! 并可选地在此之前将套件分片到多个 CI 运行器上。

use crate::core::error::SplitError;
use crate::core::models::{ExecutionGroup, FileGroup, SpecFile};

/// Default number of execution groups, one per provisioned database slot.
/// 默认执行分组数量，每个已准备的数据库槽一个。
pub const DEFAULT_GROUPS: usize = 10;

/// A complete, fixed assignment of anchors to slots.
/// Nothing is rebalanced once the plan exists.
///
/// 锚点到槽位的完整且固定的分配。计划生成后不会再重新平衡。
#[derive(Debug)]
pub struct ExecutionPlan {
    /// Groups in slot order: `groups[i].slot == i`.
    /// 按槽位顺序排列的分组：`groups[i].slot == i`。
    pub groups: Vec<ExecutionGroup>,
    /// Number of spec files considered, including those without anchors.
    pub file_count: usize,
    /// Total anchors across all groups.
    pub anchor_count: usize,
}

impl ExecutionPlan {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Rotates one file's anchors over up to `max_groups` buckets.
///
/// The i-th anchor goes to bucket `i % max_groups`; non-empty buckets come back in
/// bucket order, each holding its anchors ascending.
///
/// 将单个文件的锚点轮转分配到最多 `max_groups` 个桶中。
pub fn split_file_rotating(file: &SpecFile, max_groups: usize) -> Vec<FileGroup> {
    let mut buckets: Vec<FileGroup> = Vec::new();
    for (i, &line) in file.anchors.iter().enumerate() {
        let bucket = i % max_groups;
        match buckets.get_mut(bucket) {
            Some(group) => group.lines.push(line),
            None => buckets.push(FileGroup::new(&file.path, line)),
        }
    }
    buckets
}

/// Splits every file with [`split_file_rotating`] and deals the resulting file groups
/// onto execution groups with a cursor that keeps advancing across files.
///
/// The cursor is not reset between files, so group sizes depend on file order when a
/// file's bucket count is not a multiple of `max_groups`. That shape is intentional and
/// must stay stable.
///
/// 使用 [`split_file_rotating`] 拆分每个文件，并用一个跨文件持续前进的游标
/// 把得到的文件分组分发到执行分组上。游标在文件之间不会重置。
pub fn split_specs_rotating(
    files: &[SpecFile],
    max_groups: usize,
) -> Result<Vec<ExecutionGroup>, SplitError> {
    if max_groups == 0 {
        return Err(SplitError::InvalidGroupCount {
            requested: 0,
            max: DEFAULT_GROUPS,
        });
    }

    let mut groups: Vec<ExecutionGroup> = Vec::new();
    let mut cursor = 0;
    for file in files {
        for file_group in split_file_rotating(file, max_groups) {
            if cursor >= max_groups {
                cursor = 0;
            }
            match groups.get_mut(cursor) {
                Some(group) => group.file_groups.push(file_group),
                None => {
                    let mut group = ExecutionGroup::new(cursor);
                    group.file_groups.push(file_group);
                    groups.push(group);
                }
            }
            cursor += 1;
        }
    }
    Ok(groups)
}

/// Keeps the items that belong to this runner when a suite is spread over several CI machines.
/// Both values must be given together and `runner_index < total_runners`.
///
/// 当套件分布在多台 CI 机器上时，保留属于当前运行器的条目。
pub fn shard<T>(
    items: Vec<T>,
    total_runners: Option<usize>,
    runner_index: Option<usize>,
) -> Result<Vec<T>, SplitError> {
    match (total_runners, runner_index) {
        (Some(total), Some(index)) => {
            if index >= total {
                return Err(SplitError::Config(
                    "runner index must be less than total runners".to_string(),
                ));
            }
            Ok(items
                .into_iter()
                .enumerate()
                .filter(|(i, _)| i % total == index)
                .map(|(_, item)| item)
                .collect())
        }
        (None, None) => Ok(items),
        _ => Err(SplitError::Config(
            "both --total-runners and --runner-index must be provided".to_string(),
        )),
    }
}

/// Creates the execution plan for the located spec files.
/// 为已定位的规格文件创建执行计划。
pub fn plan_execution(files: &[SpecFile], max_groups: usize) -> Result<ExecutionPlan, SplitError> {
    let groups = split_specs_rotating(files, max_groups)?;
    let anchor_count = groups.iter().map(ExecutionGroup::anchor_count).sum();
    Ok(ExecutionPlan {
        groups,
        file_count: files.len(),
        anchor_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_file_rotates_into_buckets() {
        let file = SpecFile::new("a_spec.rb", vec![3, 8, 12, 20, 31]);
        let buckets = split_file_rotating(&file, 2);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].lines, vec![3, 12, 31]);
        assert_eq!(buckets[1].lines, vec![8, 20]);
    }

    #[test]
    fn fewer_anchors_than_groups_yields_one_bucket_each() {
        let file = SpecFile::new("a_spec.rb", vec![5, 9]);
        let buckets = split_file_rotating(&file, 10);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].to_arg(), "a_spec.rb:5");
        assert_eq!(buckets[1].to_arg(), "a_spec.rb:9");
    }

    #[test]
    fn zero_groups_is_rejected() {
        let file = SpecFile::new("a_spec.rb", vec![1]);
        assert!(matches!(
            split_specs_rotating(&[file], 0),
            Err(SplitError::InvalidGroupCount { requested: 0, .. })
        ));
    }

    #[test]
    fn shard_requires_both_values() {
        assert!(shard(vec![1, 2, 3], Some(2), None).is_err());
        assert!(shard(vec![1, 2, 3], None, Some(0)).is_err());
        assert!(shard(vec![1, 2, 3], Some(2), Some(2)).is_err());
        assert_eq!(shard(vec![1, 2, 3], Some(2), Some(1)).unwrap(), vec![2]);
        assert_eq!(shard(vec![1, 2, 3], None, None).unwrap(), vec![1, 2, 3]);
    }
}
