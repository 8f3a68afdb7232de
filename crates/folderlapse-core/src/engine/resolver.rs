use super::collaborators::{FolderPicker, PromptKey, Prompter};
use super::config::{BooleanPromptStyle, ResolverConfig};
use super::error::EngineError;
use super::session::{Session, SessionState};
use crate::core::models::params::{FrameRate, ParameterSet, TimeWindow};
use crate::core::paths::{self, LocalPath};
use crate::core::validation::{self, ValidationError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const FOLDER_DIALOG_TITLE: &str = "Select the folder that contains the date folders";
const FPS_QUESTION: &str = "Frames per second";
const TIME_START_QUESTION: &str = "Start time HH:MM (leave blank for no limit): ";
const TIME_END_QUESTION: &str = "End time HH:MM (leave blank for no limit): ";
const OVERWRITE_QUESTION: &str = "Overwrite existing videos?";
const OVERLAY_QUESTION: &str = "Overlay the capture timestamp on each frame?";
const YES_NO_KEYS: [char; 2] = ['Y', 'N'];

/// Outcome of a resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Cancelled,
    Resolved(ParameterSet),
}

/// Maps a free-text yes/no answer to a boolean.
///
/// `y`/`yes` and `n`/`no` are recognised case-insensitively; anything else,
/// including an empty line, yields `default`.
pub fn interpret_yes_no(answer: &str, default: bool) -> bool {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

/// Collects a complete [`ParameterSet`] from a folder picker and a prompt
/// source.
pub struct ParameterResolver<F, P> {
    picker: F,
    prompter: P,
    config: ResolverConfig,
}

impl<F: FolderPicker, P: Prompter> ParameterResolver<F, P> {
    pub fn new(picker: F, prompter: P, config: ResolverConfig) -> Self {
        Self {
            picker,
            prompter,
            config,
        }
    }

    /// Asks the folder picker for the source folder.
    ///
    /// `Ok(None)` means the user cancelled; an empty selection counts as a
    /// cancellation too.
    pub fn resolve_root_path(&mut self) -> Result<Option<PathBuf>, EngineError> {
        let picked = self
            .picker
            .pick_folder(FOLDER_DIALOG_TITLE)
            .map_err(EngineError::FolderPicker)?;
        Ok(picked.filter(|path| !path.as_os_str().is_empty()))
    }

    pub fn map_to_local_path(&self, path: &Path) -> Result<LocalPath, EngineError> {
        paths::map_to_local_path(path).map_err(|source| EngineError::PathAccess {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn derive_label(&self, path: &Path) -> String {
        paths::derive_label(path)
    }

    pub fn prompt_fps(&mut self) -> Result<FrameRate, EngineError> {
        let default = self.config.defaults.fps;
        let question = format!("{} [{}]: ", FPS_QUESTION, default);
        let answer = self.prompter.read_line(PromptKey::Fps, &question)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(FrameRate::Value(default));
        }
        validation::parse_frame_rate(answer, self.config.validation)
            .map_err(|reason| invalid_input("frame rate", answer, reason))
    }

    /// Asks for the optional start and end times.
    ///
    /// Without time-window support no question is asked and the window is
    /// unbounded on both sides.
    pub fn prompt_time_window(&mut self) -> Result<TimeWindow, EngineError> {
        if !self.config.time_window {
            return Ok(TimeWindow::unbounded());
        }
        let start = self.prompt_clock_time(PromptKey::TimeStart, TIME_START_QUESTION, "start time")?;
        let end = self.prompt_clock_time(PromptKey::TimeEnd, TIME_END_QUESTION, "end time")?;
        Ok(TimeWindow::new(start, end))
    }

    pub fn prompt_boolean(
        &mut self,
        key: PromptKey,
        question: &str,
        default: bool,
    ) -> Result<bool, EngineError> {
        match self.config.boolean_style {
            BooleanPromptStyle::FreeText => {
                let hint = if default { "Y" } else { "N" };
                let question = format!("{} (Y/N) [{}]: ", question, hint);
                let answer = self.prompter.read_line(key, &question)?;
                Ok(interpret_yes_no(&answer, default))
            }
            BooleanPromptStyle::Choice => {
                let question = format!("{} [Y,N]? ", question);
                let choice = self.prompter.choose(key, &question, &YES_NO_KEYS)?;
                Ok(match choice.to_ascii_uppercase() {
                    'Y' => true,
                    'N' => false,
                    _ => default,
                })
            }
        }
    }

    /// Runs the full prompt sequence for an already selected folder.
    pub fn resolve_parameters(&mut self, root: &Path) -> Result<ParameterSet, EngineError> {
        let local = self.map_to_local_path(root)?;
        debug!(
            "Resolved folder {:?} to working path {:?} (label '{}').",
            local.display(),
            local.working(),
            self.derive_label(local.display())
        );

        let fps = self.prompt_fps()?;
        let time_window = self.prompt_time_window()?;
        let defaults = self.config.defaults;
        let overwrite =
            self.prompt_boolean(PromptKey::Overwrite, OVERWRITE_QUESTION, defaults.overwrite_existing)?;
        let overlay = self.prompt_boolean(
            PromptKey::Overlay,
            OVERLAY_QUESTION,
            defaults.show_timestamp_overlay,
        )?;

        let parameters = ParameterSet::builder()
            .root_path(local.display().to_path_buf())
            .working_path(local.working().to_path_buf())
            .fps(fps)
            .time_window(time_window)
            .overwrite_existing(overwrite)
            .show_timestamp_overlay(overlay)
            .build()?;
        info!(
            "Parameters resolved for '{}': fps={}, window={}, overwrite={}, overlay={}.",
            parameters.label(),
            parameters.fps(),
            parameters.time_window(),
            parameters.overwrite_existing(),
            parameters.show_timestamp_overlay()
        );
        Ok(parameters)
    }

    /// Picks the folder and resolves every parameter, recording the
    /// transitions on `session`.
    pub fn resolve_in(&mut self, session: &mut Session) -> Result<Resolution, EngineError> {
        let Some(root) = self.resolve_root_path()? else {
            info!("Folder selection cancelled by user.");
            session.advance(SessionState::Cancelled)?;
            return Ok(Resolution::Cancelled);
        };
        session.advance(SessionState::FolderPicked)?;

        let parameters = self.resolve_parameters(&root)?;
        session.advance(SessionState::Resolved)?;
        Ok(Resolution::Resolved(parameters))
    }

    pub fn resolve(&mut self) -> Result<Resolution, EngineError> {
        let mut session = Session::new();
        let result = self.resolve_in(&mut session);
        if result.is_err() {
            session.fail();
        }
        result
    }

    fn prompt_clock_time(
        &mut self,
        key: PromptKey,
        question: &str,
        field: &'static str,
    ) -> Result<Option<String>, EngineError> {
        let answer = self.prompter.read_line(key, question)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        validation::check_clock_time(answer, self.config.validation)
            .map_err(|reason| invalid_input(field, answer, reason))?;
        Ok(Some(answer.to_string()))
    }
}

fn invalid_input(field: &'static str, value: &str, reason: ValidationError) -> EngineError {
    EngineError::InvalidInput {
        field,
        value: value.to_string(),
        reason,
    }
}
