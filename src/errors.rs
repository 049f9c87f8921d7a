use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("IO Error: {0}")]
    IoError(String),

    #[error("Failed to read file {0}: {1}")]
    FileReadError(String, String),

    #[error("Failed to write file {0}: {1}")]
    FileWriteError(String, String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Process error: {0}")]
    ProcessError(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),
}

impl From<std::io::Error> for ForgeError {
    fn from(err: std::io::Error) -> Self {
        ForgeError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ForgeError {
    fn from(err: serde_json::Error) -> Self {
        ForgeError::ConfigError(err.to_string())
    }
}

impl From<arboard::Error> for ForgeError {
    fn from(err: arboard::Error) -> Self {
        ForgeError::ClipboardError(err.to_string())
    }
}
