pub mod context_data;
pub mod step;

pub use context_data::SharedContext;
pub use step::{Step, StepHandle};
