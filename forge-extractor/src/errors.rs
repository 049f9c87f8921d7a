use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Type '{0}' not found in code")]
    NotFound(String),
    #[error("Type '{0}' opens a block that is never closed")]
    Unterminated(String),
    #[error("Invalid declaration pattern: {0}")]
    InvalidPattern(String),
}

impl From<regex::Error> for ExtractionError {
    fn from(err: regex::Error) -> Self {
        ExtractionError::InvalidPattern(err.to_string())
    }
}
