//! CLI command definitions

use clap::Args;

/// Run a pipeline
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Environment overrides (key=value), applied on top of the pipeline env
    #[arg(long, value_parser = parse_key_value)]
    pub env: Vec<(String, String)>,

    /// Override the pipeline's default base image
    #[arg(long)]
    pub image: Option<String>,

    /// Path to the docker executable
    #[arg(long)]
    pub docker: Option<String>,

    /// Per-step timeout in seconds (no timeout if omitted)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Validate a pipeline configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Parse key=value pairs
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(format!("Invalid key=value pair: {}", s));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}
