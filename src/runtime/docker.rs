//! Docker CLI backend - runs step containers via `docker run`

use crate::runtime::{ContainerRuntime, ExecOutput, ExecSpec, RuntimeError};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Configuration for the docker backend
#[derive(Debug, Clone)]
pub struct DockerConfig {
    /// Path to the docker executable
    ///
    /// If not provided, defaults to "docker" (assumes it's on PATH).
    pub docker_path: Option<String>,

    /// Timeout for a single container run in seconds
    ///
    /// `None` imposes no timeout; a stuck command then blocks the run
    /// until the caller kills the process.
    pub timeout_secs: Option<u64>,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            docker_path: None,
            timeout_secs: None,
        }
    }
}

impl DockerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_docker_path(mut self, path: String) -> Self {
        self.docker_path = Some(path);
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

/// Container backend that drives the local docker CLI
#[derive(Debug, Clone)]
pub struct DockerRuntime {
    docker_path: String,
    timeout_secs: Option<u64>,
}

impl DockerRuntime {
    /// Create a new docker backend
    pub fn new(config: DockerConfig) -> Self {
        Self {
            docker_path: config.docker_path.unwrap_or_else(|| "docker".to_string()),
            timeout_secs: config.timeout_secs,
        }
    }

    /// Get the docker executable path
    #[cfg(test)]
    pub fn docker_path(&self) -> &str {
        &self.docker_path
    }

    /// Check whether the docker daemon is reachable
    pub async fn is_available(&self) -> bool {
        let output = Command::new(&self.docker_path)
            .args(["version", "--format", "{{.Server.Version}}"])
            .output()
            .await;

        output.map(|o| o.status.success()).unwrap_or(false)
    }

    /// Assemble the `docker run` argument list for a spec
    fn build_args(spec: &ExecSpec) -> Vec<String> {
        let mut args = vec!["run".to_string(), "--rm".to_string()];

        if let Some(workdir) = &spec.workdir {
            args.push("-w".to_string());
            args.push(workdir.clone());
        }

        for (key, value) in &spec.env {
            args.push("-e".to_string());
            args.push(format!("{}={}", key, value));
        }

        for mount in &spec.mounts {
            args.push("-v".to_string());
            args.push(format!("{}:{}", mount.host, mount.container));
        }

        args.push(spec.image.clone());
        args.extend(spec.command.iter().cloned());

        args
    }

    async fn run_container(&self, spec: &ExecSpec) -> Result<ExecOutput, RuntimeError> {
        let args = Self::build_args(spec);
        debug!("Spawning docker with args: {:?}", args);

        let result = match self.timeout_secs {
            Some(secs) => timeout(
                Duration::from_secs(secs),
                Command::new(&self.docker_path)
                    .args(&args)
                    .kill_on_drop(true)
                    .output(),
            )
            .await
            .map_err(|_| RuntimeError::Timeout(secs))?,
            None => {
                Command::new(&self.docker_path)
                    .args(&args)
                    .kill_on_drop(true)
                    .output()
                    .await
            }
        };

        let output = result.map_err(|e| {
            RuntimeError::Unavailable(format!("failed to spawn {}: {}", self.docker_path, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            warn!("docker run exited with code {}: {}", exit_code, stderr.trim());
            return Err(RuntimeError::CommandFailed {
                code: exit_code,
                stderr: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        debug!("docker run returned {} bytes of stdout", stdout.len());

        Ok(ExecOutput { stdout, stderr })
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn exec(&self, spec: &ExecSpec) -> Result<ExecOutput, RuntimeError> {
        self.run_container(spec).await
    }
}
