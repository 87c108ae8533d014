use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stepchain::{ChainError, Pipeline};
use std::hint::black_box;

// Using ChainError directly for benchmark simplicity.
type BenchPipeline = Pipeline<u64, u64, ChainError>;

// --- Helper: CPU-bound step, `iterations` of work per call ---
fn add_work(value: u64, iterations: &u64) -> Result<u64, ChainError> {
  let mut acc = value;
  for _ in 0..*iterations {
    acc = acc.wrapping_add(1);
  }
  Ok(acc)
}

fn build_pipeline(num_steps: usize) -> BenchPipeline {
  let mut pipeline = BenchPipeline::labeled("bench");
  for i in 0..num_steps {
    pipeline.step(format!("step_{}", i), add_work);
  }
  pipeline
}

fn bench_full_run(c: &mut Criterion) {
  let mut group = c.benchmark_group("FullRun");

  for num_steps in [1usize, 10, 100].iter() {
    for iterations in [1u64, 100].iter() {
      let pipeline = build_pipeline(*num_steps);

      group.throughput(Throughput::Elements(*num_steps as u64));
      group.bench_with_input(
        BenchmarkId::new(format!("{}iter", iterations), num_steps),
        &(*num_steps, *iterations),
        |b, &(_num_steps, iterations)| {
          b.iter(|| pipeline.run(black_box(0), &iterations).unwrap());
        },
      );
    }
  }
  group.finish();
}

fn bench_partial_runs(c: &mut Criterion) {
  let mut group = c.benchmark_group("PartialRuns");
  let num_steps = 100usize;
  let pipeline = build_pipeline(num_steps);
  let middle = format!("step_{}", num_steps / 2);
  let every_other: Vec<String> = (0..num_steps).step_by(2).map(|i| format!("step_{}", i)).collect();

  group.bench_function("run_only_half", |b| {
    b.iter(|| pipeline.run_only(&every_other, black_box(0), &1).unwrap())
  });
  group.bench_function("run_without_half", |b| {
    b.iter(|| pipeline.run_without(&every_other, black_box(0), &1).unwrap())
  });
  group.bench_function("run_from_middle", |b| {
    b.iter(|| pipeline.run_from(&middle, black_box(0), &1).unwrap())
  });
  group.bench_function("run_until_middle", |b| {
    b.iter(|| pipeline.run_until(&middle, black_box(0), &1).unwrap())
  });
  group.finish();
}

fn bench_nested_pipelines(c: &mut Criterion) {
  let mut group = c.benchmark_group("Nested");

  for depth in [1usize, 4, 16].iter() {
    let mut pipeline = build_pipeline(4);
    for level in 0..*depth {
      let mut outer = BenchPipeline::new();
      outer.step(format!("level_{}", level), pipeline).step("tail", add_work);
      pipeline = outer;
    }

    group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, _| {
      b.iter(|| pipeline.run(black_box(0), &1).unwrap())
    });
  }
  group.finish();
}

fn bench_registration(c: &mut Criterion) {
  let mut group = c.benchmark_group("Registration");

  group.bench_function("append_100", |b| b.iter(|| build_pipeline(100)));
  group.bench_function("before_anchor_100", |b| {
    b.iter_batched(
      || build_pipeline(100),
      |mut pipeline| {
        for i in 0..100 {
          pipeline.before("step_50", format!("inserted_{}", i), add_work).unwrap();
        }
        pipeline
      },
      criterion::BatchSize::SmallInput,
    )
  });
  group.finish();
}

criterion_group!(
  benches,
  bench_full_run,
  bench_partial_runs,
  bench_nested_pipelines,
  bench_registration
);
criterion_main!(benches);
