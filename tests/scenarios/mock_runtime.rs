//! Mock container backend for deterministic, fast tests

use async_trait::async_trait;
use conveyor::{ContainerRuntime, ExecOutput, ExecSpec, RuntimeError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock backend that returns scripted results
///
/// This is useful for:
/// - Fast, deterministic tests without spawning docker
/// - Testing first-failure semantics (which steps ran, which never did)
/// - Asserting the exact run requests the runner hands to the backend
pub struct MockRuntime {
    results: Mutex<VecDeque<Result<ExecOutput, RuntimeError>>>,
    invocations: Arc<Mutex<Vec<ExecSpec>>>,
    simulate_delay: Option<Duration>,
}

impl MockRuntime {
    /// Create a mock backend with scripted per-call results
    pub fn new(results: Vec<Result<ExecOutput, RuntimeError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            invocations: Arc::new(Mutex::new(Vec::new())),
            simulate_delay: None,
        }
    }

    /// Create a mock backend where every call succeeds with the given stdout
    pub fn succeeding(outputs: &[&str]) -> Self {
        Self::new(
            outputs
                .iter()
                .map(|o| Ok(ExecOutput::stdout_only(*o)))
                .collect(),
        )
    }

    /// Add artificial delay to simulate a slow backend
    #[allow(dead_code)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.simulate_delay = Some(delay);
        self
    }

    /// Handle to the recorded invocations, valid after the runner
    /// has taken ownership of the mock
    pub fn invocations_handle(&self) -> Arc<Mutex<Vec<ExecSpec>>> {
        self.invocations.clone()
    }

    /// Get number of scripted results remaining
    #[allow(dead_code)]
    pub fn remaining(&self) -> usize {
        self.results.lock().unwrap().len()
    }
}

#[async_trait]
impl ContainerRuntime for MockRuntime {
    async fn exec(&self, spec: &ExecSpec) -> Result<ExecOutput, RuntimeError> {
        self.invocations.lock().unwrap().push(spec.clone());

        if let Some(delay) = self.simulate_delay {
            tokio::time::sleep(delay).await;
        }

        self.results.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(RuntimeError::Internal(
                "MockRuntime: no scripted result available for this call".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_runtime_returns_scripted_results() {
        let runtime = MockRuntime::succeeding(&["first\n", "second\n"]);
        let spec = ExecSpec::new("alpine", vec!["true".to_string()]);

        let r1 = runtime.exec(&spec).await.unwrap();
        assert_eq!(r1.stdout, "first\n");

        let r2 = runtime.exec(&spec).await.unwrap();
        assert_eq!(r2.stdout, "second\n");
    }

    #[tokio::test]
    async fn test_mock_runtime_exhausted() {
        let runtime = MockRuntime::succeeding(&["only one\n"]);
        let spec = ExecSpec::new("alpine", vec!["true".to_string()]);

        runtime.exec(&spec).await.unwrap();
        let result = runtime.exec(&spec).await;

        assert!(matches!(result, Err(RuntimeError::Internal(_))));
    }

    #[tokio::test]
    async fn test_mock_runtime_records_invocations() {
        let runtime = MockRuntime::succeeding(&["a\n", "b\n"]);
        let invocations = runtime.invocations_handle();

        let first = ExecSpec::new("alpine", vec!["echo".to_string(), "a".to_string()]);
        let second = ExecSpec::new("alpine", vec!["echo".to_string(), "b".to_string()]);
        runtime.exec(&first).await.unwrap();
        runtime.exec(&second).await.unwrap();

        let recorded = invocations.lock().unwrap();
        assert_eq!(*recorded, vec![first, second]);
    }
}
