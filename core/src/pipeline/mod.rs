// stepchain/src/pipeline/mod.rs

//! Defines the `Pipeline<T, A, E>` struct, its construction, modification, and execution logic.

pub mod definition;
pub mod execution;
pub mod registration;

pub use definition::Pipeline;
