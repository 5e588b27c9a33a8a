//! Integration tests with a real local docker daemon
//!
//! These tests require docker to be installed and the daemon running.
//! They are tagged with `#[ignore]` and should be run explicitly with:
//!
//!     cargo test --test integration -- --ignored

use conveyor::{DockerConfig, DockerRuntime, PipelineConfig, StepError, StepRunner};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }

    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run a pipeline YAML against the real docker backend
async fn run_with_real_docker(yaml: &str) -> (Result<(), StepError>, String) {
    let config = PipelineConfig::from_yaml(yaml).unwrap();
    let steps = config.to_steps();

    let docker = DockerRuntime::new(DockerConfig::default());
    assert!(
        docker.is_available().await,
        "docker must be available for integration tests"
    );

    let buf = SharedBuf::new();
    let mut runner = StepRunner::new(docker).with_output(Box::new(buf.clone()));
    let result = runner.run(&steps).await;

    (result, buf.contents())
}

/// The original three-step demo pipeline, end to end
#[tokio::test]
#[ignore] // Requires a local docker daemon
async fn test_three_echo_steps_with_real_docker() {
    let yaml = r#"
name: "Demo App"
image: "alpine"

steps:
  - name: "Step 1"
    run: ["echo", "hello world step 1"]
  - name: "Step 2"
    run: ["echo", "hello world step 2"]
  - name: "Step 3"
    run: ["echo", "hello world step 3"]
"#;

    let (result, output) = run_with_real_docker(yaml).await;

    assert!(result.is_ok(), "Pipeline should succeed: {:?}", result);

    for n in 1..=3 {
        assert!(output.contains(&format!("::group::Step {}\n", n)));
        assert!(output.contains(&format!("hello world step {}", n)));
    }
    assert_eq!(output.matches("::endgroup::").count(), 3);
}

/// A failing step aborts the run; later steps leave no trace
#[tokio::test]
#[ignore]
async fn test_failing_step_stops_real_pipeline() {
    let yaml = r#"
name: "Failing"
image: "alpine"

steps:
  - name: "Step 1"
    run: ["echo", "ok"]
  - name: "Step 2"
    run: ["sh", "-c", "echo doomed >&2; exit 1"]
  - name: "Step 3"
    run: ["echo", "never"]
"#;

    let (result, output) = run_with_real_docker(yaml).await;

    let err = result.unwrap_err();
    assert_eq!(err.step_name(), Some("Step 2"));
    assert!(err.to_string().contains("doomed"));

    assert!(output.contains("::group::Step 2\n"));
    assert!(!output.contains("Step 3"));
    // The failing step's group is still closed
    assert_eq!(output.matches("::endgroup::").count(), 2);
}

/// Env vars and workdir reach the container
#[tokio::test]
#[ignore]
async fn test_env_and_workdir_reach_the_container() {
    let yaml = r#"
name: "Env"
image: "alpine"
workdir: "/tmp"
env:
  GREETING: "hello from conveyor"

steps:
  - name: "Env"
    run: ["sh", "-c", "echo $GREETING; pwd"]
"#;

    let (result, output) = run_with_real_docker(yaml).await;

    assert!(result.is_ok());
    assert!(output.contains("hello from conveyor"));
    assert!(output.contains("/tmp"));
}
