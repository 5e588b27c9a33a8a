//! Container run request and result types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for backend operations
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("container backend unavailable: {0}")]
    Unavailable(String),

    #[error("command exited with code {code}: {stderr}")]
    CommandFailed { code: i32, stderr: String },

    #[error("timeout after {0} seconds")]
    Timeout(u64),

    #[error("internal error: {0}")]
    Internal(String),
}

/// A host bind mount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    /// Host path
    pub host: String,
    /// Path inside the container
    pub container: String,
}

/// A single container run request
///
/// Describes everything the backend needs to materialize a container
/// and run one command in it to completion: the base image, the command,
/// and optional refinements (env, workdir, mounts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecSpec {
    /// Base image reference (e.g. "alpine", "node:16")
    pub image: String,

    /// Command as an argument list; the first entry is the program
    pub command: Vec<String>,

    /// Environment variables, in a deterministic order
    pub env: Vec<(String, String)>,

    /// Working directory inside the container
    pub workdir: Option<String>,

    /// Host bind mounts
    pub mounts: Vec<Mount>,
}

impl ExecSpec {
    /// Create a run request for a command in an image
    pub fn new(image: impl Into<String>, command: Vec<String>) -> Self {
        Self {
            image: image.into(),
            command,
            env: Vec::new(),
            workdir: None,
            mounts: Vec::new(),
        }
    }

    /// Add an environment variable
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Set the working directory
    pub fn with_workdir(mut self, workdir: impl Into<String>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }

    /// Add a host bind mount
    pub fn with_mount(mut self, host: impl Into<String>, container: impl Into<String>) -> Self {
        self.mounts.push(Mount {
            host: host.into(),
            container: container.into(),
        });
        self
    }
}

/// Captured output of a completed container command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecOutput {
    /// Everything the command wrote to stdout
    pub stdout: String,

    /// Everything the command wrote to stderr
    pub stderr: String,
}

impl ExecOutput {
    /// Create an output with empty stderr
    #[allow(dead_code)]
    pub fn stdout_only(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}
