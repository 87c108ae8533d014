// stepchain/src/pipeline/execution.rs

//! Contains the `run*` family of methods. Every mode is the same left fold over
//! the pipeline's order, restricted to a different selection of steps; the
//! order itself always comes from the pipeline, never from the caller.

use crate::core::step::Step;
use crate::error::{ChainError, RunBoundary};
use crate::pipeline::definition::Pipeline;
use std::collections::HashSet;
use tracing::{event, instrument, span, Level};

impl<T, A, E> Pipeline<T, A, E>
where
  T: 'static,
  A: 'static,
  E: std::error::Error + From<ChainError> + Send + Sync + 'static,
{
  /// Runs every step in order, feeding each step's output to the next, and
  /// returns the last output. An empty pipeline returns `input` unchanged.
  ///
  /// The first step error aborts the run and is returned as is.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(pipeline = %self.label(), num_steps = self.order.len()),
        err(Display)
    )]
  pub fn run(&self, input: T, args: &A) -> Result<T, E> {
    event!(Level::DEBUG, "Pipeline execution starting.");
    let output = self.fold(self.order.iter().enumerate(), input, args)?;
    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(output)
  }

  /// Runs only the steps named in `steps`, in pipeline order. Names the
  /// pipeline does not know are ignored.
  #[instrument(
        name = "Pipeline::run_only",
        skip_all,
        fields(pipeline = %self.label(), num_selected = steps.len()),
        err(Display)
    )]
  pub fn run_only<S: AsRef<str>>(&self, steps: &[S], input: T, args: &A) -> Result<T, E> {
    let selected: HashSet<&str> = steps.iter().map(AsRef::as_ref).collect();
    self.note_unknown(&selected);
    self.fold(
      self.order.iter().enumerate().filter(|(_, name)| selected.contains(name.as_str())),
      input,
      args,
    )
  }

  /// Runs every step except those named in `excluded`. Names the pipeline
  /// does not know are ignored.
  #[instrument(
        name = "Pipeline::run_without",
        skip_all,
        fields(pipeline = %self.label(), num_excluded = excluded.len()),
        err(Display)
    )]
  pub fn run_without<S: AsRef<str>>(&self, excluded: &[S], input: T, args: &A) -> Result<T, E> {
    let excluded: HashSet<&str> = excluded.iter().map(AsRef::as_ref).collect();
    self.note_unknown(&excluded);
    self.fold(
      self.order.iter().enumerate().filter(|(_, name)| !excluded.contains(name.as_str())),
      input,
      args,
    )
  }

  /// Runs from `anchor` (inclusive) to the end.
  ///
  /// Fails with [`ChainError::UnknownStep`] before running anything if `anchor`
  /// is not in the pipeline.
  #[instrument(
        name = "Pipeline::run_from",
        skip_all,
        fields(pipeline = %self.label(), %anchor),
        err(Display)
    )]
  pub fn run_from(&self, anchor: &str, input: T, args: &A) -> Result<T, E> {
    let start = self.boundary(anchor, RunBoundary::From)?;
    self.fold(self.order.iter().enumerate().skip(start), input, args)
  }

  /// Runs from the first step through `anchor` (inclusive), then stops.
  ///
  /// Fails with [`ChainError::UnknownStep`] before running anything if `anchor`
  /// is not in the pipeline.
  #[instrument(
        name = "Pipeline::run_until",
        skip_all,
        fields(pipeline = %self.label(), %anchor),
        err(Display)
    )]
  pub fn run_until(&self, anchor: &str, input: T, args: &A) -> Result<T, E> {
    let end = self.boundary(anchor, RunBoundary::Until)?;
    self.fold(self.order.iter().enumerate().take(end + 1), input, args)
  }

  fn fold<'p, I>(&'p self, steps: I, input: T, args: &A) -> Result<T, E>
  where
    I: Iterator<Item = (usize, &'p String)>,
  {
    let mut output = input;
    for (step_idx, step_name) in steps {
      let step_span = span!(
        Level::INFO,
        "pipeline_step_execution",
        step_name = step_name.as_str(),
        step_index = step_idx
      );
      let _step_span_guard = step_span.enter();

      let step = self.handle(step_name).map_err(E::from)?;
      event!(Level::TRACE, "Executing step.");
      output = match step.call(output, args) {
        Ok(next) => next,
        Err(e) => {
          event!(Level::ERROR, error = %e, "Step failed.");
          return Err(e);
        }
      };
    }
    Ok(output)
  }

  fn boundary(&self, anchor: &str, boundary: RunBoundary) -> Result<usize, E> {
    self.position(anchor).ok_or_else(|| {
      event!(Level::WARN, %anchor, %boundary, "Run boundary step not found.");
      E::from(ChainError::UnknownStep {
        step_name: anchor.to_string(),
        boundary,
      })
    })
  }

  fn note_unknown(&self, names: &HashSet<&str>) {
    for name in names.iter().filter(|name| !self.registry.contains_key(**name)) {
      event!(Level::DEBUG, step_name = %name, "Selected step is not in the pipeline; ignoring.");
    }
  }
}

/// A pipeline is itself a step: it runs all of its own steps on the value it
/// is handed, with the same extra context.
impl<T, A, E> Step<T, A, E> for Pipeline<T, A, E>
where
  T: 'static,
  A: 'static,
  E: std::error::Error + From<ChainError> + Send + Sync + 'static,
{
  fn call(&self, input: T, args: &A) -> Result<T, E> {
    self.run(input, args)
  }
}
