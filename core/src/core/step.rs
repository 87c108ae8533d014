// stepchain/src/core/step.rs

//! Defines the `Step` trait, the single capability every registered unit of work exposes.

/// A unit of work in a pipeline: takes the running value plus the run's extra
/// context and returns the next running value.
///
/// Every `Fn(T, &A) -> Result<T, E>` is a `Step`, and so is a whole
/// [`Pipeline<T, A, E>`](crate::Pipeline), which is how pipelines nest.
///
/// Closures passed to the registration methods need annotated parameter types,
/// e.g. `|n: i64, _: &()| Ok(n * 2)`, since their signature cannot be inferred
/// through this trait.
pub trait Step<T, A, E> {
  /// Transforms `input`. `args` is the same value for every step of a single run.
  fn call(&self, input: T, args: &A) -> Result<T, E>;
}

impl<T, A, E, F> Step<T, A, E> for F
where
  F: Fn(T, &A) -> Result<T, E>,
{
  fn call(&self, input: T, args: &A) -> Result<T, E> {
    self(input, args)
  }
}

/// Shared handle to a type-erased step, as stored in a pipeline's registry.
pub type StepHandle<T, A, E> = std::sync::Arc<dyn Step<T, A, E> + Send + Sync + 'static>;
