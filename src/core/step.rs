//! Step domain model

use crate::core::config::StepConfig;
use std::collections::HashMap;

/// A single step in a pipeline
///
/// Steps are built once from configuration at process start and are
/// read-only for the rest of the run. Pipeline-level defaults (image,
/// environment, working directory, mounts) are already resolved into
/// each step, so the runner never needs to consult the config again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Human-readable step name, used as the log group title
    pub name: String,

    /// Command to run inside the container (argv, no shell)
    pub command: Vec<String>,

    /// Base image the container is materialized from
    pub image: String,

    /// Environment variables visible to the command
    pub env: HashMap<String, String>,

    /// Working directory inside the container
    pub workdir: Option<String>,

    /// Host bind mounts, as `host:container` specs
    pub mounts: Vec<String>,
}

/// Pipeline-level defaults applied to every step
#[derive(Debug, Clone, Default)]
pub struct StepDefaults {
    pub image: String,
    pub env: HashMap<String, String>,
    pub workdir: Option<String>,
    pub mounts: Vec<String>,
}

impl Step {
    /// Create a step from a step config, resolving pipeline defaults
    ///
    /// Step-level values win over pipeline-level ones; environment maps
    /// are merged with the step's entries taking precedence.
    pub fn from_config(config: &StepConfig, defaults: &StepDefaults) -> Self {
        let mut env = defaults.env.clone();
        env.extend(config.env.clone());

        Step {
            name: config.name.clone(),
            command: config.run.clone(),
            image: config
                .image
                .clone()
                .unwrap_or_else(|| defaults.image.clone()),
            env,
            workdir: config.workdir.clone().or_else(|| defaults.workdir.clone()),
            mounts: defaults.mounts.clone(),
        }
    }
}
