// stepchain/examples/nested_pipeline.rs

use stepchain::{ChainError, Pipeline, SharedContext};
use tracing::info;

// Extra context handed to every step: an audit log the steps append to.
type Audit = SharedContext<Vec<String>>;

fn audited(
  label: &'static str,
  f: fn(i64) -> i64,
) -> impl Fn(i64, &Audit) -> Result<i64, ChainError> + Send + Sync + 'static {
  move |n: i64, audit: &Audit| {
    let out = f(n);
    audit.write().push(format!("{}: {} -> {}", label, n, out));
    Ok(out)
  }
}

fn main() -> Result<(), ChainError> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  info!("--- Nested Pipeline Example ---");

  let mut sub = Pipeline::<i64, Audit>::labeled("sub");
  sub.step("double", audited("double", |n| n * 2));

  // The same sub-pipeline registered twice around another step.
  let mut outer = Pipeline::<i64, Audit>::labeled("outer");
  outer
    .step("sub", sub.clone())
    .step("add-one", audited("add-one", |n| n + 1))
    .step("sub-again", sub);

  let audit = Audit::default();
  let result = outer.run(2, &audit)?;
  info!(result, "Outer pipeline finished.");
  for line in audit.read().iter() {
    info!("{}", line);
  }

  Ok(())
}
