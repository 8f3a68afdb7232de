use clap::{Args, Parser, Subcommand, ValueEnum};
use folderlapse::core::validation::InputValidation;
use folderlapse::engine::config::{BooleanPromptStyle, Profile};
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Folderlapse - pick a folder of dated image folders, answer a few questions, and render one timelapse video per day.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// What to do. Defaults to `run` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    /// Defaults to `folderlapse.toml` in the user configuration directory.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Choose a folder, answer the prompts and run the timelapse renderer.
    Run(RunArgs),
    /// Manage the Python virtual environment used by the renderer.
    Env(EnvArgs),
}

/// Launcher variant.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileChoice {
    /// Ask for a time window; yes/no questions are typed.
    Full,
    /// No time window; yes/no questions are single key presses.
    Basic,
}

impl From<ProfileChoice> for Profile {
    fn from(choice: ProfileChoice) -> Self {
        match choice {
            ProfileChoice::Full => Profile::Full,
            ProfileChoice::Basic => Profile::Basic,
        }
    }
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PromptStyleChoice {
    /// Type Y or N and press Enter; Enter alone keeps the default.
    FreeText,
    /// Press Y or N.
    Choice,
}

impl From<PromptStyleChoice> for BooleanPromptStyle {
    fn from(choice: PromptStyleChoice) -> Self {
        match choice {
            PromptStyleChoice::FreeText => BooleanPromptStyle::FreeText,
            PromptStyleChoice::Choice => BooleanPromptStyle::Choice,
        }
    }
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationChoice {
    /// Forward answers to the renderer as typed.
    PassThrough,
    /// Reject malformed frame rates and times before rendering.
    Strict,
}

impl From<ValidationChoice> for InputValidation {
    fn from(choice: ValidationChoice) -> Self {
        match choice {
            ValidationChoice::PassThrough => InputValidation::PassThrough,
            ValidationChoice::Strict => InputValidation::Strict,
        }
    }
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    // --- Prompt Shape ---
    /// Launcher variant, selecting time-window support and yes/no prompt style.
    #[arg(long, value_enum, value_name = "PROFILE")]
    pub profile: Option<ProfileChoice>,

    /// Override how yes/no questions are asked.
    #[arg(long, value_enum, value_name = "STYLE")]
    pub prompt_style: Option<PromptStyleChoice>,

    /// Override whether the start/end time questions are asked.
    #[command(flatten)]
    pub time_window: TimeWindowToggle,

    /// Reject malformed frame rates and times instead of forwarding them.
    #[arg(long)]
    pub strict: bool,

    // --- Preset Answers ---
    /// Use this folder instead of opening the folder picker.
    #[arg(short, long, value_name = "PATH")]
    pub folder: Option<PathBuf>,

    /// Answer the frame-rate question in advance.
    #[arg(long, value_name = "FPS")]
    pub fps: Option<String>,

    /// Answer the start-time question in advance (HH:MM).
    #[arg(long, value_name = "HH:MM")]
    pub time_start: Option<String>,

    /// Answer the end-time question in advance (HH:MM).
    #[arg(long, value_name = "HH:MM")]
    pub time_end: Option<String>,

    /// Answer the overwrite question in advance.
    #[command(flatten)]
    pub overwrite: OverwriteToggle,

    /// Answer the timestamp-overlay question in advance.
    #[command(flatten)]
    pub overlay: OverlayToggle,

    // --- Renderer & Environment ---
    /// Path to the renderer script.
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Path to the renderer's requirements manifest.
    #[arg(long, value_name = "PATH")]
    pub requirements: Option<PathBuf>,

    /// Python interpreter used to create the virtual environment.
    #[arg(long, value_name = "PATH")]
    pub python: Option<PathBuf>,

    /// Location of the virtual environment.
    #[arg(long, value_name = "PATH")]
    pub venv: Option<PathBuf>,

    /// Print the renderer command instead of preparing the environment and running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Wait for Enter before exiting.
    #[command(flatten)]
    pub pause: PauseToggle,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S defaults.fps=30
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct TimeWindowToggle {
    /// Ask for start and end times.
    #[arg(long)]
    pub time_window: bool,
    /// Do not ask for start and end times.
    #[arg(long)]
    pub no_time_window: bool,
}

#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct OverwriteToggle {
    /// Overwrite videos that already exist.
    #[arg(long)]
    pub overwrite: bool,
    /// Keep videos that already exist.
    #[arg(long)]
    pub no_overwrite: bool,
}

#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct OverlayToggle {
    /// Draw the capture timestamp on each frame.
    #[arg(long)]
    pub overlay: bool,
    /// Do not draw the capture timestamp.
    #[arg(long)]
    pub no_overlay: bool,
}

#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct PauseToggle {
    /// Wait for Enter before the window closes.
    #[arg(long)]
    pub pause: bool,
    /// Exit immediately.
    #[arg(long)]
    pub no_pause: bool,
}

/// Collapses a `--x` / `--no-x` pair into an optional override.
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    }
}

impl TimeWindowToggle {
    pub fn value(self) -> Option<bool> {
        toggle(self.time_window, self.no_time_window)
    }
}

impl OverwriteToggle {
    pub fn value(self) -> Option<bool> {
        toggle(self.overwrite, self.no_overwrite)
    }
}

impl OverlayToggle {
    pub fn value(self) -> Option<bool> {
        toggle(self.overlay, self.no_overlay)
    }
}

impl PauseToggle {
    pub fn value(self) -> Option<bool> {
        toggle(self.pause, self.no_pause)
    }
}

/// Arguments for the `env` subcommand.
#[derive(Args, Debug)]
pub struct EnvArgs {
    #[command(subcommand)]
    pub command: EnvCommands,
}

/// Available commands for environment management.
#[derive(Subcommand, Debug)]
pub enum EnvCommands {
    /// Create the virtual environment and install the renderer's requirements now.
    Setup {
        /// Delete and recreate an existing environment.
        #[arg(long)]
        force: bool,

        /// Python interpreter used to create the environment.
        #[arg(long, value_name = "PATH")]
        python: Option<PathBuf>,

        /// Requirements manifest to install.
        #[arg(long, value_name = "PATH")]
        requirements: Option<PathBuf>,
    },
    /// Show the absolute path to the virtual environment.
    Path,
    /// Set a custom absolute path for the virtual environment.
    SetPath {
        /// The new location of the virtual environment.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Reset the environment path to its default, OS-specific location.
    ResetPath,
}
