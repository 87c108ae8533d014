// stepchain/src/pipeline/registration.rs

//! Contains the methods that add, move, replace and remove steps.
//!
//! A step name appears at most once in a pipeline. Registering a name again
//! replaces its callable; `step`/`last` keep its position, while `first`,
//! `before` and `after` move it to the requested position.

use crate::core::step::Step;
use crate::error::{ChainError, Placement};
use crate::pipeline::definition::Pipeline;
use std::sync::Arc;
use tracing::{event, Level};

impl<T, A, E> Pipeline<T, A, E>
where
  T: 'static,
  A: 'static,
  E: std::error::Error + From<ChainError> + Send + Sync + 'static,
{
  /// Registers `step` under `name`.
  ///
  /// A new name is appended to the end of the pipeline. An existing name keeps
  /// its position and only has its callable replaced.
  pub fn step<N, S>(&mut self, name: N, step: S) -> &mut Self
  where
    N: Into<String>,
    S: Step<T, A, E> + Send + Sync + 'static,
  {
    let name = name.into();
    if self.contains(&name) {
      event!(Level::DEBUG, pipeline = %self.label(), step_name = %name, "Step replaced in place.");
    } else {
      self.order.push(name.clone());
      event!(Level::DEBUG, pipeline = %self.label(), step_name = %name, index = self.order.len() - 1, "Step appended.");
    }
    self.registry.insert(name, Arc::new(step));
    self
  }

  /// Registers `step` under `name` at the front of the pipeline.
  ///
  /// If `name` is already first only the callable is replaced. If it sits
  /// anywhere else it is moved to the front.
  pub fn first<N, S>(&mut self, name: N, step: S) -> &mut Self
  where
    N: Into<String>,
    S: Step<T, A, E> + Send + Sync + 'static,
  {
    let name = name.into();
    if self.order.first() != Some(&name) {
      self.unlink(&name);
      self.order.insert(0, name.clone());
      event!(Level::DEBUG, pipeline = %self.label(), step_name = %name, "Step placed first.");
    }
    self.registry.insert(name, Arc::new(step));
    self
  }

  /// Alias for [`step`](Self::step).
  pub fn last<N, S>(&mut self, name: N, step: S) -> &mut Self
  where
    N: Into<String>,
    S: Step<T, A, E> + Send + Sync + 'static,
  {
    self.step(name, step)
  }

  /// Registers `step` under `name` immediately before `anchor`.
  ///
  /// Fails with [`ChainError::AnchorNotFound`] when the pipeline has steps but
  /// none called `anchor`; the pipeline is left untouched in that case. On an
  /// empty pipeline the anchor is not required and `name` becomes the only step.
  pub fn before<N, S>(&mut self, anchor: &str, name: N, step: S) -> Result<&mut Self, ChainError>
  where
    N: Into<String>,
    S: Step<T, A, E> + Send + Sync + 'static,
  {
    self.place(Placement::Before, anchor, name.into(), step)
  }

  /// Registers `step` under `name` immediately after `anchor`.
  ///
  /// Same anchor rules as [`before`](Self::before), including the empty-pipeline exception.
  pub fn after<N, S>(&mut self, anchor: &str, name: N, step: S) -> Result<&mut Self, ChainError>
  where
    N: Into<String>,
    S: Step<T, A, E> + Send + Sync + 'static,
  {
    self.place(Placement::After, anchor, name.into(), step)
  }

  /// Removes `name` from the pipeline. Unknown names are ignored.
  pub fn drop_step(&mut self, name: &str) -> &mut Self {
    if self.unlink(name) {
      self.registry.remove(name);
      event!(Level::DEBUG, pipeline = %self.label(), step_name = %name, "Step dropped.");
    } else {
      event!(Level::TRACE, pipeline = %self.label(), step_name = %name, "Drop of unknown step ignored.");
    }
    self
  }

  fn place<S>(&mut self, placement: Placement, anchor: &str, name: String, step: S) -> Result<&mut Self, ChainError>
  where
    S: Step<T, A, E> + Send + Sync + 'static,
  {
    if !self.order.is_empty() && !self.contains(anchor) {
      event!(Level::WARN, pipeline = %self.label(), step_name = %name, %anchor, %placement, "Placement anchor not found.");
      return Err(ChainError::AnchorNotFound {
        anchor: anchor.to_string(),
        step_name: name,
        placement,
      });
    }

    if name != anchor {
      self.unlink(&name);
      // Anchor is absent only when the pipeline was empty.
      let idx = match (self.position(anchor), placement) {
        (Some(idx), Placement::Before) => idx,
        (Some(idx), Placement::After) => idx + 1,
        (None, _) => self.order.len(),
      };
      self.order.insert(idx, name.clone());
      event!(Level::DEBUG, pipeline = %self.label(), step_name = %name, %anchor, %placement, index = idx, "Step placed.");
    } else if self.order.is_empty() {
      self.order.push(name.clone());
    }

    self.registry.insert(name, Arc::new(step));
    Ok(self)
  }

  /// Removes `name` from `order` only. Returns whether it was present.
  fn unlink(&mut self, name: &str) -> bool {
    match self.position(name) {
      Some(idx) => {
        self.order.remove(idx);
        true
      }
      None => false,
    }
  }
}
