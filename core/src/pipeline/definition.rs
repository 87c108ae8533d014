// stepchain/src/pipeline/definition.rs

//! Contains the `Pipeline<T, A, E>` struct definition, its construction and
//! read-only inspection of its step order.

use crate::core::step::StepHandle;
use crate::error::ChainError;
use std::collections::HashMap;
use std::fmt;

const DEFAULT_LABEL: &str = "pipeline";

/// An ordered chain of named steps.
///
/// - `T` is the value threaded through the steps: each step's output is the next one's input.
/// - `A` is the extra context handed, unchanged, to every step of a run.
/// - `E` is the error type steps return. It must be `From<ChainError>` so that
///   unknown-anchor errors from `run_from`/`run_until` can be reported in it.
///
/// `order` decides execution sequence; `registry` only maps names to callables.
/// Every mutating method keeps the two in sync and `order` free of duplicates.
///
/// Mutation needs `&mut self`, so a pipeline cannot be changed while one of its
/// runs is in progress. Since every stored step is `Send + Sync`, a finished
/// pipeline can be shared (e.g. behind an `Arc`) and run from several threads.
pub struct Pipeline<T, A = (), E = ChainError>
where
  T: 'static,
  A: 'static,
  E: std::error::Error + From<ChainError> + Send + Sync + 'static,
{
  pub(crate) label: Option<String>,
  /// Step names in execution order.
  pub(crate) order: Vec<String>,
  pub(crate) registry: HashMap<String, StepHandle<T, A, E>>,
}

impl<T, A, E> Pipeline<T, A, E>
where
  T: 'static,
  A: 'static,
  E: std::error::Error + From<ChainError> + Send + Sync + 'static,
{
  /// Creates an empty pipeline.
  pub fn new() -> Self {
    Self {
      label: None,
      order: Vec::new(),
      registry: HashMap::new(),
    }
  }

  /// Creates an empty pipeline whose label shows up in tracing spans.
  pub fn labeled<S: Into<String>>(label: S) -> Self {
    let mut pipeline = Self::new();
    pipeline.label = Some(label.into());
    pipeline
  }

  pub fn set_label<S: Into<String>>(&mut self, label: S) -> &mut Self {
    self.label = Some(label.into());
    self
  }

  pub fn label(&self) -> &str {
    self.label.as_deref().unwrap_or(DEFAULT_LABEL)
  }

  /// Step names in execution order.
  pub fn steps(&self) -> impl Iterator<Item = &str> + '_ {
    self.order.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }

  pub fn contains(&self, step_name: &str) -> bool {
    self.position(step_name).is_some()
  }

  /// Index of `step_name` in execution order.
  pub fn position(&self, step_name: &str) -> Option<usize> {
    self.order.iter().position(|name| name == step_name)
  }

  pub(crate) fn handle(&self, step_name: &str) -> Result<&StepHandle<T, A, E>, ChainError> {
    self.registry.get(step_name).ok_or_else(|| {
      ChainError::Internal(format!(
        "step '{}' is ordered in pipeline '{}' but has no registered callable",
        step_name,
        self.label()
      ))
    })
  }
}

impl<T, A, E> Default for Pipeline<T, A, E>
where
  T: 'static,
  A: 'static,
  E: std::error::Error + From<ChainError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

// Callables are shared, so a clone can be mutated independently of the original
// while both keep invoking the same step functions.
impl<T, A, E> Clone for Pipeline<T, A, E>
where
  T: 'static,
  A: 'static,
  E: std::error::Error + From<ChainError> + Send + Sync + 'static,
{
  fn clone(&self) -> Self {
    Self {
      label: self.label.clone(),
      order: self.order.clone(),
      registry: self.registry.clone(),
    }
  }
}

impl<T, A, E> fmt::Debug for Pipeline<T, A, E>
where
  T: 'static,
  A: 'static,
  E: std::error::Error + From<ChainError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pipeline")
      .field("label", &self.label())
      .field("steps", &self.order)
      .finish()
  }
}
