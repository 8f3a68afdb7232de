use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidAssignment(String),

    #[error("Invalid boolean '{0}'. Expected true/false, yes/no or 1/0.")]
    InvalidBool(String),

    #[error("Unrecognised Python version output '{0}'.")]
    InvalidPythonVersion(String),
}

/// A `MAJOR.MINOR.PATCH` interpreter version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl std::fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Splits `KEY=VALUE` at the first `=`.
pub fn parse_assignment(text: &str) -> Result<(&str, &str), ParseError> {
    match text.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidAssignment(text.to_string())),
    }
}

pub fn parse_bool(text: &str) -> Result<bool, ParseError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Ok(true),
        "false" | "no" | "n" | "0" | "off" => Ok(false),
        _ => Err(ParseError::InvalidBool(text.to_string())),
    }
}

/// Parses interpreter output such as `3.11.4` or `Python 3.8.10`.
pub fn parse_python_version(output: &str) -> Result<PythonVersion, ParseError> {
    let invalid = || ParseError::InvalidPythonVersion(output.trim().to_string());
    let text = output.trim();
    let text = text.strip_prefix("Python").unwrap_or(text).trim();

    let mut parts = text.split('.');
    let mut next = || -> Result<u32, ParseError> {
        let part = parts.next().ok_or_else(invalid)?;
        let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().map_err(|_| invalid())
    };
    let major = next()?;
    let minor = next()?;
    let patch = next().unwrap_or(0);

    Ok(PythonVersion {
        major,
        minor,
        patch,
    })
}
