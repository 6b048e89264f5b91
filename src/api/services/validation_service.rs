use thiserror::Error;

const MAX_MESSAGE_CHARS: usize = 10_000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Message cannot be empty")]
    Empty,

    #[error("Message too long (max {MAX_MESSAGE_CHARS} characters)")]
    TooLong,

    #[error("Message contains invalid characters")]
    InvalidCharacters,
}

/// Validates and sanitizes a user message before it can reach a turn. A
/// rejected message causes no session mutation at all.
pub fn validate_user_message(message: &str) -> Result<String, ValidationError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ValidationError::Empty);
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ValidationError::TooLong);
    }
    if message
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
    {
        return Err(ValidationError::InvalidCharacters);
    }
    Ok(message.to_string())
}

/// Task descriptions for the planning endpoint follow the same rules.
pub fn validate_task(task: &str) -> Result<String, ValidationError> {
    validate_user_message(task)
}
