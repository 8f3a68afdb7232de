use folderlapse::core::models::params::DEFAULT_FPS;
use folderlapse::core::validation::InputValidation;
use folderlapse::engine::config::Profile;

pub const CONFIG_FILE_NAME: &str = "folderlapse.toml";

pub struct DefaultsConfig {
    pub profile: Profile,
    pub validation: InputValidation,
    pub fps: u32,
    pub overwrite: bool,
    pub overlay: bool,
    pub script: String,
    pub requirements: String,
    pub pause_on_exit: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            profile: Profile::Full,
            validation: InputValidation::PassThrough,
            fps: DEFAULT_FPS,
            overwrite: false,
            overlay: true,
            script: "timelapse_from_folders.py".to_string(),
            requirements: "requirements.txt".to_string(),
            pause_on_exit: cfg!(windows),
        }
    }
}
