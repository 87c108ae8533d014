// stepchain/examples/basic_pipeline.rs

use stepchain::{ChainError, Pipeline};
use tracing::info;

// 1. Define the value that flows through the pipeline.
//    One step turns the number into text, so the value is an enum.
#[derive(Debug, Clone)]
enum Value {
  Int(i64),
  Text(String),
}

fn double(value: Value, _: &()) -> Result<Value, ChainError> {
  match value {
    Value::Int(n) => Ok(Value::Int(n * 2)),
    other => Err(anyhow::anyhow!("double expects an integer, got {:?}", other).into()),
  }
}

fn add_one(value: Value, _: &()) -> Result<Value, ChainError> {
  match value {
    Value::Int(n) => Ok(Value::Int(n + 1)),
    other => Err(anyhow::anyhow!("add-one expects an integer, got {:?}", other).into()),
  }
}

fn stringify(value: Value, _: &()) -> Result<Value, ChainError> {
  match value {
    Value::Int(n) => Ok(Value::Text(format!("Result: {}", n))),
    text => Ok(text),
  }
}

fn main() -> Result<(), ChainError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipeline Example ---");

  // 2. Build the pipeline by name.
  let mut pipeline = Pipeline::<Value>::labeled("basic");
  pipeline.step("double", double).step("stringify", stringify);
  pipeline.before("stringify", "add-one", add_one)?;
  info!(steps = ?pipeline.steps().collect::<Vec<_>>(), "Pipeline assembled.");

  // 3. Run it whole or in part.
  info!(result = ?pipeline.run(self::Value::Int(2), &())?, "run");
  info!(result = ?pipeline.run_only(&["stringify", "double"], self::Value::Int(2), &())?, "run_only");
  info!(result = ?pipeline.run_without(&["add-one"], self::Value::Int(2), &())?, "run_without");
  info!(result = ?pipeline.run_from("add-one", self::Value::Int(2), &())?, "run_from");
  info!(result = ?pipeline.run_until("add-one", self::Value::Int(2), &())?, "run_until");

  // 4. Unknown anchors are reported, not ignored.
  if let Err(e) = pipeline.run_from("triple", Value::Int(2), &()) {
    info!(error = %e, invalid_argument = e.is_invalid_argument(), "Expected failure.");
  }

  Ok(())
}
