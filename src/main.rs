mod cli;
mod core;
mod execution;
mod runtime;

use anyhow::{Context, Result};
use cli::commands::{RunCommand, ValidateCommand};
use cli::output::*;
use cli::{Cli, Command};
use execution::StepRunner;
use runtime::{DockerConfig, DockerRuntime};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use crate::core::config::PipelineConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging (stderr; stdout belongs to the log group protocol)
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Run(cmd) => run_pipeline(cmd).await?,
        Command::Validate(cmd) => validate_pipeline(cmd)?,
    }

    Ok(())
}

async fn run_pipeline(cmd: &RunCommand) -> Result<()> {
    // Load pipeline config
    let mut config =
        PipelineConfig::from_file(&cmd.file).context("Failed to load pipeline config")?;

    eprintln!("{} Loaded pipeline: {}", INFO, style(&config.name).bold());

    // Apply CLI overrides
    if let Some(image) = &cmd.image {
        config.image = image.clone();
        eprintln!("{} Image override: {}", INFO, style(image).cyan());
    }
    for (key, value) in &cmd.env {
        config.env.insert(key.clone(), value.clone());
        eprintln!(
            "{} Env override: {} = {}",
            INFO,
            style(key).cyan(),
            style(value).dim()
        );
    }

    let steps = config.to_steps();

    // Set up the docker backend
    let mut docker_config = DockerConfig::default();
    if let Some(path) = &cmd.docker {
        docker_config = docker_config.with_docker_path(path.clone());
    }
    if let Some(secs) = cmd.timeout_secs {
        docker_config = docker_config.with_timeout(secs);
    }
    let docker = DockerRuntime::new(docker_config);

    if !docker.is_available().await {
        anyhow::bail!("docker is not available (is the daemon running?)");
    }

    // Create the runner with console status output
    let mut runner =
        StepRunner::new(docker).on_event(|event| eprintln!("{}", format_run_event(event)));

    // Execute pipeline
    eprintln!();
    let result = runner.run(&steps).await;

    // Print final status
    match result {
        Ok(()) => {
            eprintln!(
                "\n{} {} completed {}",
                CHECK,
                style(&config.name).bold(),
                style("successfully").green()
            );
            Ok(())
        }
        Err(err) => {
            eprintln!(
                "\n{} {} {}",
                CROSS,
                style(&config.name).bold(),
                style("failed").red()
            );
            error!("{}", err);
            std::process::exit(1);
        }
    }
}

fn validate_pipeline(cmd: &ValidateCommand) -> Result<()> {
    eprintln!("{} Validating pipeline...", INFO);

    let result = PipelineConfig::from_file(&cmd.file);

    match result {
        Ok(config) => {
            eprintln!("{} Pipeline configuration is valid!", CHECK);
            eprintln!("  Name: {}", style(&config.name).bold());
            eprintln!("  Image: {}", style(&config.image).cyan());
            eprintln!("  Steps: {}", style(config.steps.len()).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("{}", json);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{} Validation failed:", CROSS);
            eprintln!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}
