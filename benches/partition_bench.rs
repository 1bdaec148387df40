use criterion::{Criterion, criterion_group, criterion_main};
use spec_splitter::core::execution::{TestRunner, execute_groups};
use spec_splitter::core::locator::anchors_in;
use spec_splitter::core::models::{ExecutionGroup, SpecFile};
use spec_splitter::core::planner::split_specs_rotating;
use spec_splitter::core::SplitError;
use std::hint::black_box;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

/// Returns a canned document instead of spawning a process.
struct CannedRunner;

impl TestRunner for CannedRunner {
    async fn run_group(&self, group: &ExecutionGroup) -> Result<Vec<u8>, SplitError> {
        Ok(format!(
            r#"{{"examples":[],"summary":{{"example_count":{}}}}}"#,
            group.anchor_count()
        )
        .into_bytes())
    }
}

fn suite() -> Vec<SpecFile> {
    (0..400)
        .map(|i| SpecFile::new(format!("spec/models/model_{i}_spec.rb"), (1..=(i % 37 + 1)).map(|l| l * 4).collect()))
        .collect()
}

fn bench_split(c: &mut Criterion) {
    let files = suite();
    c.bench_function("split_specs_rotating", |b| {
        b.iter(|| split_specs_rotating(black_box(&files), 10).unwrap());
    });
}

fn bench_locate(c: &mut Criterion) {
    let text: String = (0..2000)
        .map(|i| match i % 4 {
            0 => "  it 'does something' do\n",
            1 => "    expect(subject).to be_valid\n",
            2 => "  end\n",
            _ => "  # it 'is a comment'\n",
        })
        .collect();
    c.bench_function("anchors_in", |b| {
        b.iter(|| anchors_in(black_box(&text)));
    });
}

fn bench_execute(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let groups = split_specs_rotating(&suite(), 10).unwrap();
    let runner = Arc::new(CannedRunner);

    c.bench_function("execute_groups", |b| {
        b.to_async(&rt).iter(|| async {
            let cancel = CancellationToken::new();
            let _ = execute_groups(groups.clone(), Arc::clone(&runner), &cancel, |_| {}).await;
        });
    });
}

criterion_group!(benches, bench_split, bench_locate, bench_execute);
criterion_main!(benches);
