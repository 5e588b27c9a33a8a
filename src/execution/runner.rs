//! Step runner - executes pipeline steps sequentially in containers

use crate::{
    core::Step,
    execution::groups,
    runtime::{ContainerRuntime, ExecSpec, RuntimeError},
};
use chrono::{DateTime, Utc};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Error from a pipeline run
#[derive(Debug, Error)]
pub enum StepError {
    /// A step's container command failed; later steps were not run
    #[error("step '{step}' failed: {source}")]
    Execution {
        step: String,
        #[source]
        source: RuntimeError,
    },

    /// Writing to the log output sink failed
    #[error("failed to write log output: {0}")]
    Output(#[from] io::Error),
}

impl StepError {
    /// Name of the failing step, if the error came from a step
    pub fn step_name(&self) -> Option<&str> {
        match self {
            StepError::Execution { step, .. } => Some(step),
            StepError::Output(_) => None,
        }
    }
}

/// Events that occur during a pipeline run
///
/// Observability only - handlers cannot influence control flow.
#[derive(Debug, Clone)]
pub enum RunEvent {
    PipelineStarted {
        run_id: Uuid,
        started_at: DateTime<Utc>,
        total_steps: usize,
    },
    StepStarted {
        name: String,
        index: usize,
    },
    StepCompleted {
        name: String,
        index: usize,
        duration: Duration,
    },
    StepFailed {
        name: String,
        index: usize,
        error: String,
    },
    PipelineCompleted {
        run_id: Uuid,
        success: bool,
    },
}

/// Type for event handlers
pub type EventHandler = Box<dyn Fn(&RunEvent) + Send>;

/// Runs an ordered list of steps against a container backend
///
/// Each step is wrapped in a log group on the output sink; the captured
/// container stdout lands inside the group. Execution is strictly
/// sequential and stops at the first failure. The failing step's group
/// is still closed before the error propagates, so the log viewer never
/// folds the rest of the log into it.
pub struct StepRunner<R> {
    runtime: R,
    out: Box<dyn Write + Send>,
    event_handler: Option<EventHandler>,
}

impl<R: ContainerRuntime> StepRunner<R> {
    /// Create a runner that writes group markers to stdout
    pub fn new(runtime: R) -> Self {
        Self {
            runtime,
            out: Box::new(io::stdout()),
            event_handler: None,
        }
    }

    /// Redirect group markers and step output to another sink
    pub fn with_output(mut self, out: Box<dyn Write + Send>) -> Self {
        self.out = out;
        self
    }

    /// Register an event handler
    pub fn on_event<F>(mut self, handler: F) -> Self
    where
        F: Fn(&RunEvent) + Send + 'static,
    {
        self.event_handler = Some(Box::new(handler));
        self
    }

    fn emit(&self, event: RunEvent) {
        if let Some(handler) = &self.event_handler {
            handler(&event);
        }
    }

    /// Execute all steps in order, stopping at the first failure
    ///
    /// An empty step list succeeds immediately: no markers are written
    /// and the backend is never invoked.
    pub async fn run(&mut self, steps: &[Step]) -> Result<(), StepError> {
        let run_id = Uuid::new_v4();
        info!("Starting pipeline run {} ({} steps)", run_id, steps.len());
        self.emit(RunEvent::PipelineStarted {
            run_id,
            started_at: Utc::now(),
            total_steps: steps.len(),
        });

        for (index, step) in steps.iter().enumerate() {
            self.emit(RunEvent::StepStarted {
                name: step.name.clone(),
                index,
            });

            let started = Instant::now();
            groups::start_group(&mut self.out, &step.name)?;

            let spec = spec_for(step);
            debug!("Executing step '{}' in image {}", step.name, spec.image);
            let result = self.runtime.exec(&spec).await;

            match result {
                Ok(output) => {
                    if !output.stdout.is_empty() {
                        self.out.write_all(output.stdout.as_bytes())?;
                    }
                    groups::end_group(&mut self.out)?;
                    self.out.flush()?;

                    info!("Step '{}' completed", step.name);
                    self.emit(RunEvent::StepCompleted {
                        name: step.name.clone(),
                        index,
                        duration: started.elapsed(),
                    });
                }
                Err(err) => {
                    // Close the group before propagating.
                    groups::end_group(&mut self.out)?;
                    self.out.flush()?;

                    error!("Step '{}' failed: {}", step.name, err);
                    self.emit(RunEvent::StepFailed {
                        name: step.name.clone(),
                        index,
                        error: err.to_string(),
                    });
                    self.emit(RunEvent::PipelineCompleted {
                        run_id,
                        success: false,
                    });

                    return Err(StepError::Execution {
                        step: step.name.clone(),
                        source: err,
                    });
                }
            }
        }

        info!("Pipeline run {} completed", run_id);
        self.emit(RunEvent::PipelineCompleted {
            run_id,
            success: true,
        });

        Ok(())
    }
}

/// Build the backend run request for a step
fn spec_for(step: &Step) -> ExecSpec {
    let mut spec = ExecSpec::new(step.image.clone(), step.command.clone());

    // Sort for a deterministic argument order
    let mut env: Vec<_> = step.env.iter().collect();
    env.sort();
    for (key, value) in env {
        spec = spec.with_env(key.clone(), value.clone());
    }

    if let Some(workdir) = &step.workdir {
        spec = spec.with_workdir(workdir.clone());
    }

    for mount in &step.mounts {
        if let Some((host, container)) = mount.split_once(':') {
            spec = spec.with_mount(host, container);
        }
    }

    spec
}
