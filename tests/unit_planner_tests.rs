//! # Planner Unit Tests / 执行计划单元测试
//!
//! Checks the rotating split: completeness, the worked two-file example, slot
//! numbering and the cross-file cursor.
//!
//! 检查轮转拆分：完整性、两个文件的示例、槽位编号以及跨文件游标。

mod common;

use common::spec_file;
use spec_splitter::core::models::{AnchorRef, SpecFile};
use spec_splitter::core::planner::{plan_execution, shard, split_specs_rotating};
use std::collections::BTreeSet;
use std::path::PathBuf;

fn anchor(path: &str, line: u32) -> AnchorRef {
    AnchorRef {
        path: PathBuf::from(path),
        line,
    }
}

#[test]
fn worked_example_two_files_two_groups() {
    let files = vec![
        SpecFile::new("a_spec.rb", vec![10, 20, 30]),
        SpecFile::new("b_spec.rb", vec![5, 15]),
    ];
    let groups = split_specs_rotating(&files, 2).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(
        groups[0].anchors().collect::<Vec<_>>(),
        vec![anchor("a_spec.rb", 10), anchor("a_spec.rb", 30), anchor("b_spec.rb", 5)]
    );
    assert_eq!(
        groups[1].anchors().collect::<Vec<_>>(),
        vec![anchor("a_spec.rb", 20), anchor("b_spec.rb", 15)]
    );
    assert_eq!(groups[0].runner_args(), vec!["a_spec.rb:10:30", "b_spec.rb:5"]);
    assert_eq!(groups[1].runner_args(), vec!["a_spec.rb:20", "b_spec.rb:15"]);
}

#[test]
fn every_anchor_is_assigned_exactly_once() {
    for max_groups in 1..=12 {
        for layout in [vec![0, 1, 2], vec![7, 3, 11, 1], vec![25], vec![1, 1, 1, 1, 1, 1, 1]] {
            let files: Vec<SpecFile> = layout
                .iter()
                .enumerate()
                .map(|(i, &count)| spec_file(&format!("f{i}_spec.rb"), count))
                .collect();
            let expected: BTreeSet<AnchorRef> = files
                .iter()
                .flat_map(|f| f.anchors.iter().map(|&line| AnchorRef { path: f.path.clone(), line }))
                .collect();

            let groups = split_specs_rotating(&files, max_groups).unwrap();
            let assigned: Vec<AnchorRef> = groups.iter().flat_map(|g| g.anchors()).collect();
            let unique: BTreeSet<AnchorRef> = assigned.iter().cloned().collect();

            assert_eq!(assigned.len(), unique.len(), "duplicate anchor with K={max_groups}");
            assert_eq!(unique, expected, "lost anchor with K={max_groups}");
            assert!(groups.len() <= max_groups);
        }
    }
}

#[test]
fn slots_are_distinct_and_in_order() {
    let files = vec![spec_file("a_spec.rb", 9), spec_file("b_spec.rb", 4)];
    let groups = split_specs_rotating(&files, 5).unwrap();
    for (i, group) in groups.iter().enumerate() {
        assert_eq!(group.slot, i);
        assert!(group.anchor_count() > 0);
    }
}

#[test]
fn cursor_carries_over_between_files() {
    // One single-anchor file per slot: the cursor keeps walking instead of
    // restarting at slot 0 for each file.
    let files = vec![
        spec_file("a_spec.rb", 1),
        spec_file("b_spec.rb", 1),
        spec_file("c_spec.rb", 3),
    ];
    let groups = split_specs_rotating(&files, 3).unwrap();
    assert_eq!(groups[0].runner_args(), vec!["a_spec.rb:1", "c_spec.rb:2"]);
    assert_eq!(groups[1].runner_args(), vec!["b_spec.rb:1", "c_spec.rb:3"]);
    assert_eq!(groups[2].runner_args(), vec!["c_spec.rb:1"]);
}

#[test]
fn files_without_anchors_are_skipped() {
    let files = vec![spec_file("empty_spec.rb", 0), spec_file("a_spec.rb", 2)];
    let plan = plan_execution(&files, 4).unwrap();
    assert_eq!(plan.file_count, 2);
    assert_eq!(plan.anchor_count, 2);
    assert_eq!(plan.groups.len(), 2);
    assert_eq!(plan.groups[0].runner_args(), vec!["a_spec.rb:1"]);
}

#[test]
fn empty_suite_yields_empty_plan() {
    let plan = plan_execution(&[], 10).unwrap();
    assert!(plan.is_empty());
    assert_eq!(plan.anchor_count, 0);
}

#[test]
fn sharding_partitions_files_between_runners() {
    let files: Vec<u32> = (0..7).collect();
    let mut seen = Vec::new();
    for index in 0..3 {
        seen.extend(shard(files.clone(), Some(3), Some(index)).unwrap());
    }
    seen.sort();
    assert_eq!(seen, files);
    assert_eq!(shard(files, Some(3), Some(1)).unwrap(), vec![1, 4]);
}
