use crate::core::models::params::DEFAULT_FPS;
use crate::core::validation::InputValidation;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Default frame rate must be positive")]
    ZeroDefaultFps,
}

/// How yes/no questions are put to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanPromptStyle {
    /// A typed `Y/N` line; an empty line keeps the default.
    FreeText,
    /// A single-key `Y`/`N` choice with no empty option.
    Choice,
}

/// The two launcher variants, expressed as resolver presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Time-window prompts and free-text yes/no questions.
    #[default]
    Full,
    /// No time-window prompts and single-key yes/no choices.
    Basic,
}

impl Profile {
    pub fn time_window(self) -> bool {
        matches!(self, Profile::Full)
    }

    pub fn boolean_style(self) -> BooleanPromptStyle {
        match self {
            Profile::Full => BooleanPromptStyle::FreeText,
            Profile::Basic => BooleanPromptStyle::Choice,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverDefaults {
    pub fps: u32,
    pub overwrite_existing: bool,
    pub show_timestamp_overlay: bool,
}

impl Default for ResolverDefaults {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            overwrite_existing: false,
            show_timestamp_overlay: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub time_window: bool,
    pub boolean_style: BooleanPromptStyle,
    pub validation: InputValidation,
    pub defaults: ResolverDefaults,
}

impl ResolverConfig {
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            time_window: profile.time_window(),
            boolean_style: profile.boolean_style(),
            validation: InputValidation::default(),
            defaults: ResolverDefaults::default(),
        }
    }
}

#[derive(Default)]
pub struct ResolverConfigBuilder {
    time_window: Option<bool>,
    boolean_style: Option<BooleanPromptStyle>,
    validation: Option<InputValidation>,
    defaults: Option<ResolverDefaults>,
}

impl ResolverConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_profile(profile: Profile) -> Self {
        Self::new()
            .time_window(profile.time_window())
            .boolean_style(profile.boolean_style())
    }

    pub fn time_window(mut self, enabled: bool) -> Self {
        self.time_window = Some(enabled);
        self
    }
    pub fn boolean_style(mut self, style: BooleanPromptStyle) -> Self {
        self.boolean_style = Some(style);
        self
    }
    pub fn validation(mut self, validation: InputValidation) -> Self {
        self.validation = Some(validation);
        self
    }
    pub fn defaults(mut self, defaults: ResolverDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn build(self) -> Result<ResolverConfig, ConfigError> {
        let defaults = self.defaults.unwrap_or_default();
        if defaults.fps == 0 {
            return Err(ConfigError::ZeroDefaultFps);
        }
        Ok(ResolverConfig {
            time_window: self
                .time_window
                .ok_or(ConfigError::MissingParameter("time_window"))?,
            boolean_style: self
                .boolean_style
                .ok_or(ConfigError::MissingParameter("boolean_style"))?,
            validation: self.validation.unwrap_or_default(),
            defaults,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_match_the_two_launcher_variants() {
        let full = ResolverConfig::for_profile(Profile::Full);
        assert!(full.time_window);
        assert_eq!(full.boolean_style, BooleanPromptStyle::FreeText);

        let basic = ResolverConfig::for_profile(Profile::Basic);
        assert!(!basic.time_window);
        assert_eq!(basic.boolean_style, BooleanPromptStyle::Choice);
    }

    #[test]
    fn builder_from_profile_matches_profile_config() {
        let built = ResolverConfigBuilder::from_profile(Profile::Basic)
            .build()
            .unwrap();
        assert_eq!(built, ResolverConfig::for_profile(Profile::Basic));
    }

    #[test]
    fn builder_overrides_profile_choices() {
        let config = ResolverConfigBuilder::from_profile(Profile::Basic)
            .time_window(true)
            .validation(InputValidation::Strict)
            .build()
            .unwrap();

        assert!(config.time_window);
        assert_eq!(config.boolean_style, BooleanPromptStyle::Choice);
        assert_eq!(config.validation, InputValidation::Strict);
    }

    #[test]
    fn builder_requires_prompt_shape() {
        let result = ResolverConfigBuilder::new().time_window(false).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("boolean_style")));
    }

    #[test]
    fn builder_rejects_zero_default_fps() {
        let result = ResolverConfigBuilder::from_profile(Profile::Full)
            .defaults(ResolverDefaults {
                fps: 0,
                ..ResolverDefaults::default()
            })
            .build();
        assert_eq!(result, Err(ConfigError::ZeroDefaultFps));
    }
}
