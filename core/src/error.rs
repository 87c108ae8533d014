// stepchain/src/error.rs
use anyhow::Error as AnyhowError;
use std::fmt;
use thiserror::Error;

/// Where a step was being placed relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
  Before,
  After,
}

impl fmt::Display for Placement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Placement::Before => f.write_str("before"),
      Placement::After => f.write_str("after"),
    }
  }
}

/// Which end of a partial run an anchor step delimits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunBoundary {
  /// `run_from`: the anchor is the first step executed.
  From,
  /// `run_until`: the anchor is the last step executed.
  Until,
}

impl fmt::Display for RunBoundary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RunBoundary::From => f.write_str("from"),
      RunBoundary::Until => f.write_str("until"),
    }
  }
}

#[derive(Debug, Error)]
pub enum ChainError {
  #[error("Cannot place \"{step_name}\" {placement} \"{anchor}\" since \"{anchor}\" is not yet defined.")]
  AnchorNotFound {
    anchor: String,
    step_name: String,
    placement: Placement,
  },

  #[error("Cannot run {boundary} \"{step_name}\" as step is undefined.")]
  UnknownStep { step_name: String, boundary: RunBoundary },

  #[error("Error in user-provided step. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal stepchain error: {0}")]
  Internal(String),
}

impl ChainError {
  /// True for the errors caused by naming a step that is not in the pipeline:
  /// an unknown placement anchor or an unknown run boundary.
  pub fn is_invalid_argument(&self) -> bool {
    matches!(self, ChainError::AnchorNotFound { .. } | ChainError::UnknownStep { .. })
  }
}

// Lets steps written against `anyhow` use `?` inside a `Pipeline<_, _, ChainError>`.
impl From<AnyhowError> for ChainError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap a ChainError that was boxed into anyhow on the way out of a nested step.
    match err.downcast::<ChainError>() {
      Ok(chain_err) => chain_err,
      Err(source) => ChainError::HandlerError { source },
    }
  }
}

pub type ChainResult<T, E = ChainError> = std::result::Result<T, E>;
