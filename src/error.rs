//! Error types for tareas
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown task, invalid import file)
//! - 4: Operation failed (IO, serialization)

use thiserror::Error;

/// Exit codes for the tareas CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tareas operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid import file: {0}")]
    ImportInvalid(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_)
            | Error::TaskNotFound(_)
            | Error::InvalidConfig(_)
            | Error::ImportInvalid(_) => exit_codes::USER_ERROR,

            Error::Io(_) | Error::Json(_) | Error::TomlParse(_) => {
                exit_codes::OPERATION_FAILED
            }
        }
    }
}

/// Result type alias for tareas operations
pub type Result<T> = std::result::Result<T, Error>;
