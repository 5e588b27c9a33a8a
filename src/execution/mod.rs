//! Pipeline execution

pub mod groups;
pub mod runner;

pub use groups::{end_group, start_group, GROUP_END, GROUP_START};
pub use runner::{EventHandler, RunEvent, StepError, StepRunner};
