use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, EnvironmentConfig, RendererConfig};
use crate::cli::{ProfileChoice, PromptStyleChoice, RunArgs, ValidationChoice};
use crate::environment::{self, EnvironmentManager};
use crate::error::{CliError, Result};
use crate::utils::parser;
use clap::ValueEnum;
use folderlapse::core::validation::InputValidation;
use folderlapse::engine::collaborators::PromptKey;
use folderlapse::engine::config::{ResolverConfigBuilder, ResolverDefaults};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn build_config(
    args: &RunArgs,
    config_path: Option<&Path>,
    manager: &EnvironmentManager,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(config_path)?;
    let file_config = apply_set_values(file_config, &args.set_values)?;

    let prompts = file_config.prompts.unwrap_or_default();
    let profile = args
        .profile
        .or(prompts.profile)
        .map(Into::into)
        .unwrap_or(defaults.profile);

    let mut resolver = ResolverConfigBuilder::from_profile(profile);
    if let Some(enabled) = args.time_window.value().or(prompts.time_window) {
        resolver = resolver.time_window(enabled);
    }
    if let Some(style) = args.prompt_style.or(prompts.style) {
        resolver = resolver.boolean_style(style.into());
    }
    let validation = if args.strict {
        InputValidation::Strict
    } else {
        prompts
            .validation
            .map(Into::into)
            .unwrap_or(defaults.validation)
    };

    let file_defaults = file_config.defaults.unwrap_or_default();
    let resolver = resolver
        .validation(validation)
        .defaults(ResolverDefaults {
            fps: file_defaults.fps.unwrap_or(defaults.fps),
            overwrite_existing: file_defaults.overwrite.unwrap_or(defaults.overwrite),
            show_timestamp_overlay: file_defaults.overlay.unwrap_or(defaults.overlay),
        })
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let renderer_file = file_config.renderer.unwrap_or_default();
    let renderer = RendererConfig {
        script: absolutize(locate_companion(
            args.script.clone().or(renderer_file.script),
            &defaults.script,
        ))?,
        requirements: absolutize(locate_companion(
            args.requirements.clone().or(renderer_file.requirements),
            &defaults.requirements,
        ))?,
    };

    let environment_file = file_config.environment.unwrap_or_default();
    let python = args.python.clone().or(environment_file.python);
    let environment = EnvironmentConfig {
        // A bare program name is left for a PATH lookup.
        python: match python {
            Some(path) if path.components().count() > 1 => Some(absolutize(path)?),
            other => other,
        },
        venv_path: absolutize(
            args.venv
                .clone()
                .or(environment_file.venv_path)
                .unwrap_or_else(|| manager.venv_path().to_path_buf()),
        )?,
    };

    let pause_on_exit = args
        .pause
        .value()
        .or(file_config.console.and_then(|c| c.pause_on_exit))
        .unwrap_or(defaults.pause_on_exit);

    Ok(AppConfig {
        resolver,
        folder: args.folder.clone(),
        presets: collect_presets(args),
        renderer,
        environment,
        dry_run: args.dry_run,
        pause_on_exit,
    })
}

fn load_file_config(config_path: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = config_path {
        return FileConfig::from_file(path);
    }
    match environment::default_config_file() {
        Ok(path) if path.exists() => FileConfig::from_file(&path),
        _ => {
            debug!("No configuration file found, using built-in defaults.");
            Ok(FileConfig::default())
        }
    }
}

fn collect_presets(args: &RunArgs) -> HashMap<PromptKey, String> {
    let yes_no = |value: bool| if value { "Y" } else { "N" }.to_string();

    let mut presets = HashMap::new();
    if let Some(fps) = &args.fps {
        presets.insert(PromptKey::Fps, fps.clone());
    }
    if let Some(start) = &args.time_start {
        presets.insert(PromptKey::TimeStart, start.clone());
    }
    if let Some(end) = &args.time_end {
        presets.insert(PromptKey::TimeEnd, end.clone());
    }
    if let Some(overwrite) = args.overwrite.value() {
        presets.insert(PromptKey::Overwrite, yes_no(overwrite));
    }
    if let Some(overlay) = args.overlay.value() {
        presets.insert(PromptKey::Overlay, yes_no(overlay));
    }
    presets
}

/// Resolves a companion file: an explicit path wins, otherwise the first of
/// the executable's directory and the current directory that contains
/// `file_name`.
fn locate_companion(explicit: Option<PathBuf>, file_name: &str) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir().ok();
    let candidates: Vec<PathBuf> = exe_dir
        .iter()
        .chain(cwd.iter())
        .map(|dir| dir.join(file_name))
        .collect();

    candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .or(candidates.first())
        .cloned()
        .unwrap_or_else(|| PathBuf::from(file_name))
}

/// Anchors a relative path at the launcher's current directory.
///
/// The renderer runs with the photo folder as its working directory, so every
/// path handed to it must already be absolute.
fn absolutize(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    std::path::absolute(&path).map_err(CliError::Io)
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) =
            parser::parse_assignment(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
        let invalid = |expected: &str| {
            CliError::Config(format!(
                "Invalid {} value for {}: {}",
                expected, key, value_str
            ))
        };
        let parse_bool = || parser::parse_bool(value_str).map_err(|_| invalid("boolean"));

        match key {
            "prompts.profile" => {
                config.prompts.get_or_insert_with(Default::default).profile = Some(
                    ProfileChoice::from_str(value_str, true).map_err(|_| invalid("profile"))?,
                );
            }
            "prompts.style" => {
                config.prompts.get_or_insert_with(Default::default).style = Some(
                    PromptStyleChoice::from_str(value_str, true)
                        .map_err(|_| invalid("prompt style"))?,
                );
            }
            "prompts.time-window" => {
                config.prompts.get_or_insert_with(Default::default).time_window =
                    Some(parse_bool()?);
            }
            "prompts.validation" => {
                config.prompts.get_or_insert_with(Default::default).validation = Some(
                    ValidationChoice::from_str(value_str, true)
                        .map_err(|_| invalid("validation mode"))?,
                );
            }
            "defaults.fps" => {
                config.defaults.get_or_insert_with(Default::default).fps =
                    Some(value_str.parse().map_err(|_| invalid("integer"))?);
            }
            "defaults.overwrite" => {
                config.defaults.get_or_insert_with(Default::default).overwrite =
                    Some(parse_bool()?);
            }
            "defaults.overlay" => {
                config.defaults.get_or_insert_with(Default::default).overlay =
                    Some(parse_bool()?);
            }
            "console.pause-on-exit" => {
                config.console.get_or_insert_with(Default::default).pause_on_exit =
                    Some(parse_bool()?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use folderlapse::engine::config::BooleanPromptStyle;
    use once_cell::sync::Lazy;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn manager() -> EnvironmentManager {
        EnvironmentManager::with_custom_path(TEST_DIR.path().join("venv"))
    }

    fn run_args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["folderlapse", "run"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Some(Commands::Run(args)) => args,
            _ => panic!("Expected 'run' subcommand"),
        }
    }

    #[test]
    fn defaults_without_file_use_full_profile() {
        let config_path = write_config_file("empty.toml", "");
        let config = build_config(&run_args(&[]), Some(&config_path), &manager()).unwrap();

        assert!(config.resolver.time_window);
        assert_eq!(config.resolver.boolean_style, BooleanPromptStyle::FreeText);
        assert_eq!(config.resolver.validation, InputValidation::PassThrough);
        assert_eq!(config.resolver.defaults, ResolverDefaults::default());
        assert_eq!(config.environment.venv_path, TEST_DIR.path().join("venv"));
        assert!(config.presets.is_empty());
        assert!(!config.dry_run);
        assert!(
            config
                .renderer
                .script
                .ends_with("timelapse_from_folders.py")
        );
    }

    #[test]
    fn file_values_override_defaults() {
        let config_path = write_config_file(
            "basic.toml",
            r#"
            [prompts]
            profile = "basic"
            validation = "strict"

            [defaults]
            fps = 30
            overlay = false

            [environment]
            venv-path = "/opt/venvs/lapse"

            [console]
            pause-on-exit = true
            "#,
        );
        let config = build_config(&run_args(&[]), Some(&config_path), &manager()).unwrap();

        assert!(!config.resolver.time_window);
        assert_eq!(config.resolver.boolean_style, BooleanPromptStyle::Choice);
        assert_eq!(config.resolver.validation, InputValidation::Strict);
        assert_eq!(config.resolver.defaults.fps, 30);
        assert!(!config.resolver.defaults.show_timestamp_overlay);
        assert_eq!(
            config.environment.venv_path,
            PathBuf::from("/opt/venvs/lapse")
        );
        assert!(config.pause_on_exit);
    }

    #[test]
    fn cli_flags_override_file_values() {
        let config_path = write_config_file(
            "override.toml",
            r#"
            [prompts]
            profile = "basic"

            [console]
            pause-on-exit = true
            "#,
        );
        let args = run_args(&[
            "--time-window",
            "--prompt-style",
            "free-text",
            "--strict",
            "--no-pause",
            "--venv",
            "/tmp/lapse-venv",
        ]);
        let config = build_config(&args, Some(&config_path), &manager()).unwrap();

        assert!(config.resolver.time_window);
        assert_eq!(config.resolver.boolean_style, BooleanPromptStyle::FreeText);
        assert_eq!(config.resolver.validation, InputValidation::Strict);
        assert!(!config.pause_on_exit);
        assert_eq!(config.environment.venv_path, PathBuf::from("/tmp/lapse-venv"));
    }

    #[test]
    fn set_values_override_file() {
        let config_path = write_config_file("set.toml", "[defaults]\nfps = 30\n");
        let args = run_args(&[
            "-S",
            "defaults.fps=15",
            "-S",
            "prompts.profile=basic",
            "-S",
            "defaults.overwrite=yes",
        ]);
        let config = build_config(&args, Some(&config_path), &manager()).unwrap();

        assert_eq!(config.resolver.defaults.fps, 15);
        assert!(config.resolver.defaults.overwrite_existing);
        assert!(!config.resolver.time_window);
    }

    #[test]
    fn unsupported_set_key_is_rejected() {
        let config_path = write_config_file("unsupported.toml", "");
        let args = run_args(&["-S", "renderer.width=640"]);
        let result = build_config(&args, Some(&config_path), &manager());

        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("renderer.width")));
    }

    #[test]
    fn invalid_set_value_is_rejected() {
        let config_path = write_config_file("invalid.toml", "");
        let args = run_args(&["-S", "defaults.fps=fast"]);
        let result = build_config(&args, Some(&config_path), &manager());

        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("integer")));
    }

    #[test]
    fn zero_default_fps_is_a_config_error() {
        let config_path = write_config_file("zero.toml", "[defaults]\nfps = 0\n");
        let result = build_config(&run_args(&[]), Some(&config_path), &manager());
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn preset_flags_become_prompt_answers() {
        let config_path = write_config_file("presets.toml", "");
        let args = run_args(&[
            "--fps",
            "12",
            "--time-end",
            "18:30",
            "--overwrite",
            "--no-overlay",
            "--folder",
            "/srv/cams/north",
        ]);
        let config = build_config(&args, Some(&config_path), &manager()).unwrap();

        assert_eq!(config.presets.get(&PromptKey::Fps).map(String::as_str), Some("12"));
        assert_eq!(
            config.presets.get(&PromptKey::TimeEnd).map(String::as_str),
            Some("18:30")
        );
        assert_eq!(
            config.presets.get(&PromptKey::Overwrite).map(String::as_str),
            Some("Y")
        );
        assert_eq!(
            config.presets.get(&PromptKey::Overlay).map(String::as_str),
            Some("N")
        );
        assert!(!config.presets.contains_key(&PromptKey::TimeStart));
        assert_eq!(config.folder, Some(PathBuf::from("/srv/cams/north")));
    }

    #[test]
    fn relative_paths_are_anchored_at_current_directory() {
        let config_path = write_config_file(
            "relative.toml",
            "[renderer]\nscript = \"render/timelapse_from_folders.py\"\n",
        );
        let args = run_args(&[
            "--requirements",
            "reqs.txt",
            "--venv",
            "./venv",
            "--python",
            "tools/python3",
        ]);
        let config = build_config(&args, Some(&config_path), &manager()).unwrap();
        let cwd = std::env::current_dir().unwrap();

        assert!(config.renderer.script.is_absolute());
        assert!(config.renderer.script.starts_with(&cwd));
        assert!(config.renderer.script.ends_with("render/timelapse_from_folders.py"));
        assert_eq!(config.renderer.requirements, cwd.join("reqs.txt"));
        assert!(config.environment.venv_path.is_absolute());
        assert!(config.environment.venv_path.ends_with("venv"));
        assert_eq!(config.environment.python, Some(cwd.join("tools/python3")));
    }

    #[test]
    fn bare_python_name_is_left_for_path_lookup() {
        let config_path = write_config_file("bare-python.toml", "");
        let args = run_args(&["--python", "python3"]);
        let config = build_config(&args, Some(&config_path), &manager()).unwrap();

        assert_eq!(config.environment.python, Some(PathBuf::from("python3")));
    }

    #[test]
    fn explicit_companion_paths_are_kept() {
        let config_path = write_config_file("companions.toml", "");
        let args = run_args(&[
            "--script",
            "/opt/lapse/render.py",
            "--requirements",
            "/opt/lapse/reqs.txt",
        ]);
        let config = build_config(&args, Some(&config_path), &manager()).unwrap();

        assert_eq!(config.renderer.script, PathBuf::from("/opt/lapse/render.py"));
        assert_eq!(
            config.renderer.requirements,
            PathBuf::from("/opt/lapse/reqs.txt")
        );
    }
}
