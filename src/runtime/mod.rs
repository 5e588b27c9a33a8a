//! Container execution backend
//!
//! The runner core only consumes the [`ContainerRuntime`] trait; the
//! shipped implementation shells out to the local docker CLI.

pub mod docker;
pub mod spec;

use async_trait::async_trait;
pub use docker::{DockerConfig, DockerRuntime};
pub use spec::{ExecOutput, ExecSpec, Mount, RuntimeError};

/// Trait for container execution - allows for substitute backends
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Materialize the image, run the command to completion, and return
    /// its captured output
    ///
    /// The call blocks until the command finishes. A non-zero exit or a
    /// backend-level fault is reported as an error; the backend is
    /// responsible for cleaning up whatever it created.
    async fn exec(&self, spec: &ExecSpec) -> Result<ExecOutput, RuntimeError>;
}
