//! conveyor - a container-based CI pipeline runner
//!
//! Executes an ordered list of named steps, each as a command inside a
//! container, wrapping every step in a collapsible log group and
//! stopping at the first failure.

pub mod cli;
pub mod core;
pub mod execution;
pub mod runtime;

// Re-export commonly used types
pub use crate::core::{PipelineConfig, Step, StepConfig, StepDefaults};
pub use crate::execution::{RunEvent, StepError, StepRunner};
pub use crate::runtime::{
    ContainerRuntime, DockerConfig, DockerRuntime, ExecOutput, ExecSpec, Mount, RuntimeError,
};
