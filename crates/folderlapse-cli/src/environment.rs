use crate::config::defaults::CONFIG_FILE_NAME;
use crate::error::{CliError, Result};
use crate::utils::parser::{self, PythonVersion};
use directories::ProjectDirs;
use folderlapse::engine::progress::ProgressReporter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

const PATH_CONFIG_FILE: &str = "venv-path.conf";
const REQUIREMENTS_STAMP: &str = ".folderlapse-requirements";
const VENV_MARKER: &str = "pyvenv.cfg";
const VERSION_PROBE: &str = "import sys; print('%d.%d.%d' % sys.version_info[:3])";

pub const MIN_PYTHON: PythonVersion = PythonVersion {
    major: 3,
    minor: 8,
    patch: 0,
};

#[cfg(windows)]
const INTERPRETER_CANDIDATES: &[(&str, &[&str])] =
    &[("py", &["-3"]), ("python", &[]), ("python3", &[])];
#[cfg(not(windows))]
const INTERPRETER_CANDIDATES: &[(&str, &[&str])] = &[("python3", &[]), ("python", &[])];

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("org", "folderlapse", "folderlapse").ok_or_else(|| {
        CliError::EnvironmentProvisioning(
            "Could not determine the user directories for this platform.".to_string(),
        )
    })
}

/// Location of the optional `folderlapse.toml` in the user config directory.
pub fn default_config_file() -> Result<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// A system Python able to create virtual environments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    pub program: PathBuf,
    pub prefix_args: Vec<String>,
    pub version: PythonVersion,
}

impl Interpreter {
    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.prefix_args);
        command
    }
}

impl fmt::Display for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.prefix_args {
            write!(f, " {}", arg)?;
        }
        write!(f, " (Python {})", self.version)
    }
}

/// Finds a Python 3.8+ interpreter.
///
/// A configured interpreter is used as-is or rejected; otherwise the
/// platform's usual launcher names are tried in order on `PATH`.
pub fn find_interpreter(configured: Option<&Path>) -> Result<Interpreter> {
    if let Some(program) = configured {
        return probe(program.to_path_buf(), &[]).map_err(|reason| {
            CliError::InterpreterNotFound(format!("{}: {}", program.display(), reason))
        });
    }

    let mut rejected = Vec::new();
    for (name, prefix) in INTERPRETER_CANDIDATES {
        let program = match which::which(name) {
            Ok(program) => program,
            Err(_) => {
                rejected.push(format!("{}: not on PATH", name));
                continue;
            }
        };
        match probe(program, prefix) {
            Ok(interpreter) => return Ok(interpreter),
            Err(reason) => rejected.push(format!("{}: {}", name, reason)),
        }
    }
    Err(CliError::InterpreterNotFound(format!(
        "Python {}.{} or newer is required ({})",
        MIN_PYTHON.major,
        MIN_PYTHON.minor,
        rejected.join("; ")
    )))
}

fn probe(program: PathBuf, prefix: &[&str]) -> std::result::Result<Interpreter, String> {
    let output = Command::new(&program)
        .args(prefix)
        .args(["-c", VERSION_PROBE])
        .output()
        .map_err(|e| e.to_string())?;
    if !output.status.success() {
        return Err(format!("version check exited with {}", output.status));
    }

    let reported = String::from_utf8_lossy(&output.stdout);
    let version = parser::parse_python_version(reported.trim()).map_err(|e| e.to_string())?;
    if version < MIN_PYTHON {
        return Err(format!("Python {} is too old", version));
    }

    debug!("Found Python {} at {:?}", version, &program);
    Ok(Interpreter {
        program,
        prefix_args: prefix.iter().map(|s| s.to_string()).collect(),
        version,
    })
}

/// Owns the renderer's virtual environment.
#[derive(Debug, Clone)]
pub struct EnvironmentManager {
    venv_path: PathBuf,
}

impl EnvironmentManager {
    pub fn new() -> Result<Self> {
        let path = Self::determine_venv_path()?;
        debug!("EnvironmentManager initialized with path: {:?}", &path);
        Ok(Self { venv_path: path })
    }

    pub fn with_custom_path(venv_path: PathBuf) -> Self {
        Self { venv_path }
    }

    pub fn venv_path(&self) -> &Path {
        &self.venv_path
    }

    /// The interpreter inside the virtual environment.
    pub fn venv_python(&self) -> PathBuf {
        if cfg!(windows) {
            self.venv_path.join("Scripts").join("python.exe")
        } else {
            self.venv_path.join("bin").join("python")
        }
    }

    /// Creates the virtual environment if needed and installs the
    /// requirements into it, returning the environment's interpreter.
    ///
    /// Installation is skipped when the manifest has not changed since the
    /// last successful install. `force` recreates the environment from
    /// scratch.
    pub fn ensure_ready(
        &self,
        interpreter: &Interpreter,
        requirements: &Path,
        force: bool,
        reporter: &ProgressReporter,
    ) -> Result<PathBuf> {
        let manifest = fs::read_to_string(requirements).map_err(|e| {
            CliError::EnvironmentProvisioning(format!(
                "Cannot read requirements manifest '{}': {}",
                requirements.display(),
                e
            ))
        })?;

        if force && self.venv_path.exists() {
            if !self.venv_path.join(VENV_MARKER).is_file() {
                return Err(CliError::EnvironmentProvisioning(format!(
                    "Refusing to remove '{}': it has no {} and is not a virtual environment.",
                    self.venv_path.display(),
                    VENV_MARKER
                )));
            }
            info!("--force specified, removing existing environment.");
            fs::remove_dir_all(&self.venv_path)?;
        }

        let python = self.venv_python();
        if !python.exists() {
            info!(
                "Creating virtual environment at {:?} with {}",
                &self.venv_path, interpreter
            );
            reporter.phase("Creating virtual environment", || {
                let mut command = interpreter.command();
                command.args(["-m", "venv"]).arg(&self.venv_path);
                run_checked(command, "venv creation")
            })?;
        }

        if self.requirements_current(&manifest) {
            debug!("Requirements unchanged since last install, skipping pip.");
            return Ok(python);
        }

        info!("Installing requirements from {:?}", requirements);
        reporter.phase("Installing requirements", || {
            let mut command = Command::new(&python);
            command
                .args(["-m", "pip", "install", "--disable-pip-version-check", "-r"])
                .arg(requirements);
            run_checked(command, "pip install")
        })?;
        fs::write(self.venv_path.join(REQUIREMENTS_STAMP), &manifest)?;

        Ok(python)
    }

    fn requirements_current(&self, manifest: &str) -> bool {
        fs::read_to_string(self.venv_path.join(REQUIREMENTS_STAMP))
            .map(|installed| installed == manifest)
            .unwrap_or(false)
    }

    pub fn set_custom_path(path: &Path) -> Result<()> {
        let config_path = Self::get_path_config_file()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(config_path, path.to_string_lossy().as_bytes()).map_err(CliError::from)
    }

    pub fn reset_path() -> Result<()> {
        if let Ok(config_path) = Self::get_path_config_file() {
            if config_path.exists() {
                fs::remove_file(config_path)?;
            }
        }
        Ok(())
    }

    fn determine_venv_path() -> Result<PathBuf> {
        match Self::get_path_config_file() {
            Ok(config_path) if config_path.exists() => {
                let custom_path_str = fs::read_to_string(&config_path)?.trim().to_string();
                if custom_path_str.is_empty() {
                    warn!("Custom path config file is empty, falling back to default path.");
                    Self::get_default_venv_path()
                } else {
                    Ok(PathBuf::from(custom_path_str))
                }
            }
            _ => Self::get_default_venv_path(),
        }
    }

    fn get_path_config_file() -> Result<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(PATH_CONFIG_FILE))
    }

    fn get_default_venv_path() -> Result<PathBuf> {
        project_dirs().map(|dirs| dirs.data_local_dir().join("venv"))
    }
}

fn run_checked(mut command: Command, what: &str) -> Result<()> {
    debug!("Running {:?}", &command);
    let output = command.output().map_err(|e| {
        CliError::EnvironmentProvisioning(format!("Failed to launch {}: {}", what, e))
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    for line in stdout.lines().chain(stderr.lines()) {
        debug!("[{}] {}", what, line);
    }

    if output.status.success() {
        return Ok(());
    }
    let detail = stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("no output");
    Err(CliError::EnvironmentProvisioning(format!(
        "{} failed ({}): {}",
        what, output.status, detail
    )))
}
