use crate::cli::{EnvArgs, EnvCommands, RunArgs};
use crate::config::{AppConfig, build_config};
use crate::environment::{self, EnvironmentManager};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use folderlapse::engine::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(args: EnvArgs, config_path: Option<&Path>) -> Result<()> {
    match args.command {
        EnvCommands::Setup {
            force,
            python,
            requirements,
        } => handle_setup(force, python, requirements, config_path),
        EnvCommands::Path => handle_path(config_path),
        EnvCommands::SetPath { path } => handle_set_path(path, config_path),
        EnvCommands::ResetPath => handle_reset_path(),
    }
}

fn handle_setup(
    force: bool,
    python: Option<PathBuf>,
    requirements: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<()> {
    println!("Initializing environment manager...");
    let args = RunArgs {
        python,
        requirements,
        ..RunArgs::default()
    };
    let config = effective_config(&args, config_path)?;

    let interpreter = environment::find_interpreter(config.environment.python.as_deref())?;
    let manager = EnvironmentManager::with_custom_path(config.environment.venv_path);
    println!(
        "Preparing environment at {} with {}",
        manager.venv_path().display(),
        interpreter
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let python = manager.ensure_ready(&interpreter, &config.renderer.requirements, force, &reporter)?;
    progress_handler.clear();

    info!("Environment ready, interpreter at {:?}", &python);
    println!("✓ Environment ready: {}", python.display());
    Ok(())
}

/// The configuration `run` would use, so every `env` subcommand agrees with
/// it on the environment location.
fn effective_config(args: &RunArgs, config_path: Option<&Path>) -> Result<AppConfig> {
    let manager = EnvironmentManager::new()?;
    build_config(args, config_path, &manager)
}

fn effective_venv_path(config_path: Option<&Path>) -> Result<PathBuf> {
    effective_config(&RunArgs::default(), config_path).map(|config| config.environment.venv_path)
}

fn handle_path(config_path: Option<&Path>) -> Result<()> {
    println!("{}", effective_venv_path(config_path)?.display());
    Ok(())
}

fn handle_set_path(path: PathBuf, config_path: Option<&Path>) -> Result<()> {
    if !path.is_absolute() {
        return Err(CliError::Argument(format!(
            "Environment path must be absolute, got '{}'",
            path.display()
        )));
    }
    EnvironmentManager::set_custom_path(&path)?;
    println!("Environment path set to: {}", path.display());

    let effective = effective_venv_path(config_path)?;
    if effective != path {
        warn!(
            "Configuration file sets the environment to {:?}, which takes precedence.",
            &effective
        );
        println!(
            "Note: the configuration file overrides this; runs will use {}",
            effective.display()
        );
    }
    Ok(())
}

fn handle_reset_path() -> Result<()> {
    EnvironmentManager::reset_path()?;
    println!("Environment path reset to default.");
    Ok(())
}
