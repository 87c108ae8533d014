// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use stepchain::{ChainError, Pipeline, SharedContext};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Value Type ---
// Steps may turn a number into text, so the running value is an enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
  Int(i64),
  Text(String),
}

impl From<i64> for Value {
  fn from(n: i64) -> Self {
    Value::Int(n)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::Text(s.to_string())
  }
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Stepchain error: {0}")]
  Chain(String), // Store as String for Eq comparison

  #[error("Test step failed: {0}")]
  Step(String),
}

impl From<ChainError> for TestError {
  fn from(err: ChainError) -> Self {
    TestError::Chain(err.to_string())
  }
}

pub type TestPipeline<A = ()> = Pipeline<Value, A, TestError>;

// --- Canonical steps ---
pub fn double(value: Value, _args: &()) -> Result<Value, TestError> {
  match value {
    Value::Int(n) => Ok(Value::Int(n * 2)),
    other => Err(TestError::Step(format!("double expects an integer, got {:?}", other))),
  }
}

pub fn add_one(value: Value, _args: &()) -> Result<Value, TestError> {
  match value {
    Value::Int(n) => Ok(Value::Int(n + 1)),
    other => Err(TestError::Step(format!("add-one expects an integer, got {:?}", other))),
  }
}

pub fn stringify(value: Value, _args: &()) -> Result<Value, TestError> {
  match value {
    Value::Int(n) => Ok(Value::Text(format!("Result: {}", n))),
    Value::Text(s) => Ok(Value::Text(format!("Result: {}", s))),
  }
}

pub fn fail(_value: Value, _args: &()) -> Result<Value, TestError> {
  Err(TestError::Step("intentional failure".to_string()))
}

/// `[double, add-one, stringify]`, the pipeline most execution tests start from.
pub fn arithmetic_pipeline() -> TestPipeline {
  let mut pipeline = TestPipeline::new();
  pipeline
    .step("double", double)
    .step("add-one", add_one)
    .step("stringify", stringify);
  pipeline
}

pub fn order_of<A>(pipeline: &TestPipeline<A>) -> Vec<String> {
  pipeline.steps().map(str::to_string).collect()
}

// --- Journal context: records which steps ran ---
#[derive(Clone, Debug, Default)]
pub struct Journal {
  pub entries: Vec<String>,
}

pub type JournalContext = SharedContext<Journal>;

/// A step that appends `name` to the journal and passes the value through.
pub fn record(name: &'static str) -> impl Fn(Value, &JournalContext) -> Result<Value, TestError> + Send + Sync + 'static {
  move |value: Value, ctx: &JournalContext| {
    ctx.write().entries.push(name.to_string());
    tracing::debug!(target: "test_steps", step = %name, "recorded");
    Ok(value)
  }
}

/// Wraps a plain step so it also records `name` in the journal.
pub fn journaled(
  name: &'static str,
  step: fn(Value, &()) -> Result<Value, TestError>,
) -> impl Fn(Value, &JournalContext) -> Result<Value, TestError> + Send + Sync + 'static {
  move |value: Value, ctx: &JournalContext| {
    ctx.write().entries.push(name.to_string());
    step(value, &())
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counter for checking execution counts ---
pub static STEP_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  STEP_EXEC_COUNTER.store(0, Ordering::SeqCst);
}

pub fn counted_add_one(value: Value, args: &()) -> Result<Value, TestError> {
  STEP_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
  add_one(value, args)
}
