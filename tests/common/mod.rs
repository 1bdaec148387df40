// Shared test helpers for integration tests
#![allow(dead_code)]

use spec_splitter::core::models::{Example, ExampleStatus, RunResult, SpecFile, Summary};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes a spec file with `examples` `it` blocks and returns its path.
/// The anchors land on lines 2, 4, 6, ...
pub fn write_spec(dir: &Path, name: &str, examples: usize) -> PathBuf {
    let mut body = String::from("describe 'generated' do\n");
    for i in 0..examples {
        body.push_str(&format!("  it 'example {i}' do\n  end\n"));
    }
    body.push_str("end\n");
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create spec directory");
    }
    fs::write(&path, body).expect("Failed to write spec file");
    path
}

/// Builds a `SpecFile` whose anchors are `1..=count`.
pub fn spec_file(name: &str, count: u32) -> SpecFile {
    SpecFile::new(name, (1..=count).collect())
}

pub fn example(file: &str, line: u32, status: ExampleStatus) -> Example {
    Example {
        id: format!("{file}[1:{line}]"),
        description: format!("line {line}"),
        full_description: format!("{file} line {line}"),
        status,
        file_path: file.to_string(),
        line_number: line,
        run_time: 0.01,
        pending_message: None,
        exception: None,
    }
}

/// A run result holding the given examples with a summary that matches them.
pub fn run_result(examples: Vec<Example>) -> RunResult {
    let count = |status| examples.iter().filter(|e| e.status == status).count() as u64;
    let summary = Summary {
        duration: 0.5,
        example_count: examples.len() as u64,
        failure_count: count(ExampleStatus::Failed),
        pending_count: count(ExampleStatus::Pending),
        errors_outside_of_examples_count: 0,
    };
    RunResult {
        version: "3.13.0".to_string(),
        seed: 1234,
        examples,
        summary,
        ..Default::default()
    }
}
