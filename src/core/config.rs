//! Pipeline configuration from YAML

use crate::core::step::{Step, StepDefaults};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Top-level pipeline configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name
    pub name: String,

    /// Pipeline version (optional)
    #[serde(default)]
    pub version: Option<String>,

    /// Default base image for all steps
    pub image: String,

    /// Environment variables shared by all steps
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Default working directory inside step containers
    #[serde(default)]
    pub workdir: Option<String>,

    /// Host bind mounts (`host:container`) applied to every step
    #[serde(default)]
    pub mounts: Vec<String>,

    /// Pipeline steps, executed in order
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

/// Step configuration as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    /// Human-readable step name (duplicates are allowed)
    pub name: String,

    /// Command to run inside the container, as an argument list
    pub run: Vec<String>,

    /// Base image override for this step
    #[serde(default)]
    pub image: Option<String>,

    /// Extra environment variables for this step
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Working directory override for this step
    #[serde(default)]
    pub workdir: Option<String>,
}

impl PipelineConfig {
    /// Load pipeline configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse pipeline configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the pipeline configuration
    ///
    /// An empty step list is valid (the pipeline succeeds immediately).
    /// Step names do not have to be unique; the log viewer shows
    /// duplicate group titles as-is.
    pub fn validate(&self) -> Result<()> {
        if self.image.trim().is_empty() {
            anyhow::bail!("Pipeline image must not be empty");
        }

        for step in &self.steps {
            if step.name.trim().is_empty() {
                anyhow::bail!("Step names must not be empty");
            }
            if step.run.is_empty() {
                anyhow::bail!("Step '{}' has an empty command", step.name);
            }
            if let Some(image) = &step.image {
                if image.trim().is_empty() {
                    anyhow::bail!("Step '{}' has an empty image override", step.name);
                }
            }
        }

        for mount in &self.mounts {
            match mount.split_once(':') {
                Some((host, container)) if !host.is_empty() && !container.is_empty() => {}
                _ => anyhow::bail!(
                    "Invalid mount spec '{}' (expected host:container)",
                    mount
                ),
            }
        }

        Ok(())
    }

    /// Resolve the configuration into the ordered step list
    pub fn to_steps(&self) -> Vec<Step> {
        let defaults = StepDefaults {
            image: self.image.clone(),
            env: self.env.clone(),
            workdir: self.workdir.clone(),
            mounts: self.mounts.clone(),
        };

        self.steps
            .iter()
            .map(|step_config| Step::from_config(step_config, &defaults))
            .collect()
    }
}
