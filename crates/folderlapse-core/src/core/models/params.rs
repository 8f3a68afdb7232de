use crate::core::paths;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_FPS: u32 = 24;
pub const OUTPUT_WIDTH: u32 = 1280;
pub const OUTPUT_CODEC: &str = "mp4v";
pub const OUTPUT_SUBFOLDER: &str = "_Timelapse";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParameterError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("The source folder path is empty")]
    EmptyRootPath,
}

/// Frame rate forwarded to the renderer.
///
/// Free-text answers that are not a positive integer are kept verbatim so the
/// renderer can decide how to treat them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameRate {
    Value(u32),
    Verbatim(String),
}

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate::Value(DEFAULT_FPS)
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameRate::Value(fps) => write!(f, "{}", fps),
            FrameRate::Verbatim(text) => f.write_str(text),
        }
    }
}

/// Optional `HH:MM` bounds; `None` on a side means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl TimeWindow {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            return f.write_str("whole day");
        }
        write!(
            f,
            "{} - {}",
            self.start.as_deref().unwrap_or("start of day"),
            self.end.as_deref().unwrap_or("end of day")
        )
    }
}

/// The fully resolved request handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    root_path: PathBuf,
    working_path: PathBuf,
    label: String,
    output_path: PathBuf,
    fps: FrameRate,
    width: u32,
    codec: &'static str,
    time_window: TimeWindow,
    overwrite_existing: bool,
    show_timestamp_overlay: bool,
}

impl ParameterSet {
    pub fn builder() -> ParameterSetBuilder {
        ParameterSetBuilder::new()
    }

    /// The source folder as the user selected it.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// The source folder as the renderer process should see it.
    pub fn working_path(&self) -> &Path {
        &self.working_path
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn fps(&self) -> &FrameRate {
        &self.fps
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn codec(&self) -> &str {
        self.codec
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn overwrite_existing(&self) -> bool {
        self.overwrite_existing
    }

    pub fn show_timestamp_overlay(&self) -> bool {
        self.show_timestamp_overlay
    }
}

#[derive(Default)]
pub struct ParameterSetBuilder {
    root_path: Option<PathBuf>,
    working_path: Option<PathBuf>,
    fps: Option<FrameRate>,
    time_window: Option<TimeWindow>,
    overwrite_existing: Option<bool>,
    show_timestamp_overlay: Option<bool>,
}

impl ParameterSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_path(mut self, path: PathBuf) -> Self {
        self.root_path = Some(path);
        self
    }
    pub fn working_path(mut self, path: PathBuf) -> Self {
        self.working_path = Some(path);
        self
    }
    pub fn fps(mut self, fps: FrameRate) -> Self {
        self.fps = Some(fps);
        self
    }
    pub fn time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = Some(window);
        self
    }
    pub fn overwrite_existing(mut self, overwrite: bool) -> Self {
        self.overwrite_existing = Some(overwrite);
        self
    }
    pub fn show_timestamp_overlay(mut self, overlay: bool) -> Self {
        self.show_timestamp_overlay = Some(overlay);
        self
    }

    pub fn build(self) -> Result<ParameterSet, ParameterError> {
        let root_path = self
            .root_path
            .ok_or(ParameterError::MissingParameter("root_path"))?;
        if root_path.as_os_str().is_empty() {
            return Err(ParameterError::EmptyRootPath);
        }
        let working_path = self.working_path.unwrap_or_else(|| root_path.clone());
        // Derived from the same form that `--root` receives.
        let label = paths::derive_label(&working_path);
        let output_path = paths::derive_output_path(&working_path);

        Ok(ParameterSet {
            fps: self.fps.ok_or(ParameterError::MissingParameter("fps"))?,
            time_window: self.time_window.unwrap_or_default(),
            overwrite_existing: self
                .overwrite_existing
                .ok_or(ParameterError::MissingParameter("overwrite_existing"))?,
            show_timestamp_overlay: self
                .show_timestamp_overlay
                .ok_or(ParameterError::MissingParameter("show_timestamp_overlay"))?,
            width: OUTPUT_WIDTH,
            codec: OUTPUT_CODEC,
            root_path,
            working_path,
            label,
            output_path,
        })
    }
}
