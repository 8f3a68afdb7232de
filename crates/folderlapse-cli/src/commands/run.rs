use super::Completion;
use crate::cli::RunArgs;
use crate::config::defaults::DefaultsConfig;
use crate::config::{AppConfig, build_config};
use crate::console::{ConsolePrompter, DialogFolderPicker, FixedFolderPicker, PresetPrompter};
use crate::environment::{self, EnvironmentManager};
use crate::error::{CliError, Result};
use crate::renderer::{DryRunRenderer, ProcessRenderer};
use crate::utils::progress::CliProgressHandler;
use folderlapse::engine::collaborators::{PromptKey, Renderer};
use folderlapse::engine::progress::ProgressReporter;
use folderlapse::workflows::{self, launch::LaunchOutcome};
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: RunArgs, config_path: Option<&Path>) -> Completion {
    let fallback_pause = args
        .pause
        .value()
        .unwrap_or(DefaultsConfig::default().pause_on_exit);

    info!("Initializing environment manager...");
    let config = match EnvironmentManager::new()
        .and_then(|manager| build_config(&args, config_path, &manager))
    {
        Ok(config) => config,
        Err(e) => {
            return Completion {
                result: Err(e),
                pause_on_exit: fallback_pause,
            };
        }
    };

    let pause_on_exit = config.pause_on_exit;
    Completion {
        result: launch(config),
        pause_on_exit,
    }
}

fn launch(config: AppConfig) -> Result<()> {
    if ignored_time_presets(&config) {
        warn!("Start/end times were given but the time window is disabled; they will be ignored.");
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let mut renderer = prepare_renderer(&config, &reporter)?;
    progress_handler.clear();

    let prompter = PresetPrompter::new(ConsolePrompter::new(), config.presets.clone());
    info!("Invoking the launch workflow...");
    let outcome = match &config.folder {
        Some(folder) => workflows::launch::run(
            FixedFolderPicker(folder.clone()),
            prompter,
            renderer.as_mut(),
            &config.resolver,
            &reporter,
        )?,
        None => workflows::launch::run(
            DialogFolderPicker,
            prompter,
            renderer.as_mut(),
            &config.resolver,
            &reporter,
        )?,
    };

    finish(outcome)
}

/// Checks the renderer's preconditions and provisions its environment.
///
/// A dry run skips both and never touches the filesystem.
fn prepare_renderer(
    config: &AppConfig,
    reporter: &ProgressReporter,
) -> Result<Box<dyn Renderer>> {
    let manager = EnvironmentManager::with_custom_path(config.environment.venv_path.clone());
    let script = config.renderer.script.clone();

    if config.dry_run {
        return Ok(Box::new(DryRunRenderer::new(manager.venv_python(), script)));
    }

    if !script.is_file() {
        return Err(CliError::CompanionScriptMissing(script));
    }

    let interpreter = reporter.phase("Checking Python interpreter", || {
        environment::find_interpreter(config.environment.python.as_deref())
    })?;
    info!("Using interpreter {}", interpreter);
    let python = manager.ensure_ready(&interpreter, &config.renderer.requirements, false, reporter)?;

    Ok(Box::new(ProcessRenderer::new(python, script)))
}

fn ignored_time_presets(config: &AppConfig) -> bool {
    !config.resolver.time_window
        && (config.presets.contains_key(&PromptKey::TimeStart)
            || config.presets.contains_key(&PromptKey::TimeEnd))
}

fn finish(outcome: LaunchOutcome) -> Result<()> {
    let code = outcome.exit_status();
    if code != 0 {
        return Err(CliError::RendererFailure { code });
    }
    match outcome {
        LaunchOutcome::Cancelled => println!("No folder selected. Nothing to do."),
        LaunchOutcome::Completed { parameters, .. } => println!(
            "✓ Timelapse for '{}' written to: {}",
            parameters.label(),
            parameters.output_path().display()
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::{EnvironmentConfig, RendererConfig};
    use folderlapse::core::models::params::{FrameRate, ParameterSet};
    use folderlapse::engine::config::{Profile, ResolverConfig};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn app_config(profile: Profile, script: PathBuf, dry_run: bool) -> AppConfig {
        AppConfig {
            resolver: ResolverConfig::for_profile(profile),
            folder: None,
            presets: HashMap::new(),
            renderer: RendererConfig {
                script,
                requirements: PathBuf::from("/nonexistent/requirements.txt"),
            },
            environment: EnvironmentConfig {
                python: None,
                venv_path: PathBuf::from("/nonexistent/venv"),
            },
            dry_run,
            pause_on_exit: false,
        }
    }

    fn parameters() -> ParameterSet {
        ParameterSet::builder()
            .root_path(PathBuf::from("/srv/cams/2024-06-01"))
            .fps(FrameRate::Value(24))
            .overwrite_existing(false)
            .show_timestamp_overlay(true)
            .build()
            .unwrap()
    }

    #[test]
    fn missing_script_is_reported_before_prompting() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("timelapse_from_folders.py");
        let config = app_config(Profile::Full, missing.clone(), false);

        let result = launch(config);

        assert!(matches!(result, Err(CliError::CompanionScriptMissing(path)) if path == missing));
    }

    #[test]
    fn dry_run_needs_no_script_or_environment() {
        let config = app_config(Profile::Full, PathBuf::from("/nonexistent/script.py"), true);
        let renderer = prepare_renderer(&config, &ProgressReporter::new());
        assert!(renderer.is_ok());
    }

    #[test]
    fn time_presets_are_flagged_when_window_is_disabled() {
        let mut config = app_config(Profile::Basic, PathBuf::from("script.py"), true);
        assert!(!ignored_time_presets(&config));

        config
            .presets
            .insert(PromptKey::TimeStart, "08:00".to_string());
        assert!(ignored_time_presets(&config));

        config.resolver.time_window = true;
        assert!(!ignored_time_presets(&config));
    }

    #[test]
    fn outcomes_map_to_exit_results() {
        assert!(finish(LaunchOutcome::Cancelled).is_ok());
        assert!(
            finish(LaunchOutcome::Completed {
                exit_code: 0,
                parameters: parameters(),
                arguments: vec![],
            })
            .is_ok()
        );

        let failure = finish(LaunchOutcome::Completed {
            exit_code: 2,
            parameters: parameters(),
            arguments: vec![],
        })
        .unwrap_err();
        assert_eq!(failure.exit_code(), 2);
    }
}
