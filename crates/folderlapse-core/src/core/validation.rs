use crate::core::models::params::FrameRate;
use thiserror::Error;

/// How free-text answers are checked before they are forwarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputValidation {
    /// Forward answers as typed; the renderer reports malformed values.
    #[default]
    PassThrough,
    /// Reject malformed answers before the renderer is started.
    Strict,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    #[error("expected a positive whole number")]
    NotAPositiveInteger,

    #[error("expected a time in HH:MM format")]
    MalformedClockTime,

    #[error("hour {0} is outside 00-23")]
    HourOutOfRange(u32),

    #[error("minute {0} is outside 00-59")]
    MinuteOutOfRange(u32),
}

/// Interprets a non-empty frame-rate answer.
pub fn parse_frame_rate(text: &str, mode: InputValidation) -> Result<FrameRate, ValidationError> {
    match (text.parse::<u32>(), mode) {
        (Ok(fps), _) if fps > 0 => Ok(FrameRate::Value(fps)),
        (_, InputValidation::Strict) => Err(ValidationError::NotAPositiveInteger),
        (_, InputValidation::PassThrough) => Ok(FrameRate::Verbatim(text.to_string())),
    }
}

/// Checks a non-empty `HH:MM` answer. Pass-through mode accepts anything.
pub fn check_clock_time(text: &str, mode: InputValidation) -> Result<(), ValidationError> {
    if mode == InputValidation::PassThrough {
        return Ok(());
    }

    let (hours, minutes) = text
        .split_once(':')
        .ok_or(ValidationError::MalformedClockTime)?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(ValidationError::MalformedClockTime);
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::MalformedClockTime);
    }

    let hour: u32 = hours
        .parse()
        .map_err(|_| ValidationError::MalformedClockTime)?;
    let minute: u32 = minutes
        .parse()
        .map_err(|_| ValidationError::MalformedClockTime)?;
    if hour > 23 {
        return Err(ValidationError::HourOutOfRange(hour));
    }
    if minute > 59 {
        return Err(ValidationError::MinuteOutOfRange(minute));
    }
    Ok(())
}
