// src/lib.rs

//! Stepchain: an ordered, named-step execution chain.
//!
//! A [`Pipeline`] is a list of named steps. Each step turns the running value
//! into the next one, so running the pipeline is a left fold over its steps:
//!  - Steps are addressed by name: `step`, `first`, `last`, `before`, `after`, `drop_step`.
//!  - Whole or partial runs: `run`, `run_only`, `run_without`, `run_from`, `run_until`.
//!  - One extra context value is handed to every step of a run, unchanged.
//!  - A pipeline is itself a [`Step`], so pipelines nest.
//!
//! ```
//! use stepchain::{ChainError, Pipeline};
//!
//! let mut pipeline = Pipeline::<i64>::new();
//! pipeline
//!   .step("double", |n: i64, _: &()| Ok::<_, ChainError>(n * 2))
//!   .step("add-one", |n: i64, _: &()| Ok::<_, ChainError>(n + 1));
//!
//! assert_eq!(pipeline.run(2, &()).unwrap(), 5);
//! assert_eq!(pipeline.run_until("double", 2, &()).unwrap(), 4);
//! ```

pub mod core;
pub mod error;
pub mod pipeline;

// --- Re-exports for the Public API ---

pub use crate::core::context_data::SharedContext;
pub use crate::core::step::{Step, StepHandle};

pub use crate::pipeline::definition::Pipeline;

pub use crate::error::{ChainError, ChainResult, Placement, RunBoundary};
