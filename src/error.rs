use std::process::ExitCode;
use thiserror::Error;

/// Process exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    GeneralError = 1,
    UnknownSubject = 2,
    CompletionFailed = 3,
    Timeout = 5,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

#[derive(Error, Debug)]
pub enum TutorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found at {0}")]
    ConfigNotFound(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No tutor found for subject: {0}")]
    UnknownSubject(String),

    #[error("API key error: {0}")]
    ApiKey(String),

    #[error("AI Error: {0}")]
    Completion(String),

    #[error("AI Error: request timed out after {0} seconds")]
    CompletionTimeout(u64),

    #[error("Server error: {0}")]
    Server(String),
}

impl TutorError {
    /// Convert error to appropriate exit status
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            TutorError::Config(_)
            | TutorError::ConfigNotFound(_)
            | TutorError::ConfigInvalid(_)
            | TutorError::Io(_)
            | TutorError::TomlParse(_)
            | TutorError::TomlSerialize(_)
            | TutorError::Json(_)
            | TutorError::ApiKey(_)
            | TutorError::Server(_) => ExitStatus::GeneralError,

            TutorError::UnknownSubject(_) => ExitStatus::UnknownSubject,

            TutorError::Completion(_) => ExitStatus::CompletionFailed,

            TutorError::CompletionTimeout(_) => ExitStatus::Timeout,
        }
    }

    /// Machine-readable error kind reported next to `detail` in HTTP error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            TutorError::UnknownSubject(_) => "routing",
            TutorError::Completion(_) | TutorError::CompletionTimeout(_) => "completion",
            _ => "internal",
        }
    }
}

pub type Result<T> = std::result::Result<T, TutorError>;
