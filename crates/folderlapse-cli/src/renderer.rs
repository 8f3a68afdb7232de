use folderlapse::core::models::params::ParameterSet;
use folderlapse::engine::collaborators::{CollaboratorError, Renderer};
use folderlapse::engine::session::FAILURE_STATUS;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Renders a command line for display, quoting arguments that would not
/// survive a copy-paste into a shell.
pub fn format_command(python: &Path, script: &Path, arguments: &[String]) -> String {
    let mut parts = vec![
        quote(&python.to_string_lossy()),
        quote(&script.to_string_lossy()),
    ];
    parts.extend(arguments.iter().map(|arg| quote(arg)));
    parts.join(" ")
}

fn quote(arg: &str) -> String {
    if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains('"') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

/// Runs the renderer script with the environment's interpreter, sharing this
/// process's console.
pub struct ProcessRenderer {
    python: PathBuf,
    script: PathBuf,
}

impl ProcessRenderer {
    pub fn new(python: PathBuf, script: PathBuf) -> Self {
        Self { python, script }
    }
}

impl Renderer for ProcessRenderer {
    fn render(
        &mut self,
        parameters: &ParameterSet,
        arguments: &[String],
    ) -> Result<i32, CollaboratorError> {
        info!(
            "Launching renderer: {}",
            format_command(&self.python, &self.script, arguments)
        );
        let status = Command::new(&self.python)
            .arg(&self.script)
            .args(arguments)
            .current_dir(parameters.working_path())
            .status()
            .map_err(|e| format!("Failed to start {}: {}", self.python.display(), e))?;

        match status.code() {
            Some(code) => Ok(code),
            None => {
                warn!("Renderer was terminated without an exit code ({}).", status);
                Ok(FAILURE_STATUS)
            }
        }
    }
}

/// Prints the command that would run and reports success.
pub struct DryRunRenderer {
    python: PathBuf,
    script: PathBuf,
}

impl DryRunRenderer {
    pub fn new(python: PathBuf, script: PathBuf) -> Self {
        Self { python, script }
    }
}

impl Renderer for DryRunRenderer {
    fn render(
        &mut self,
        parameters: &ParameterSet,
        arguments: &[String],
    ) -> Result<i32, CollaboratorError> {
        debug!("Dry run, renderer not started.");
        println!("Would run in {}:", parameters.working_path().display());
        println!("  {}", format_command(&self.python, &self.script, arguments));
        Ok(0)
    }
}
