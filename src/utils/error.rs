use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("The file '{location}' was not found")]
    SourceNotFound { location: String },

    #[error("An unexpected error occurred while loading data from '{location}': {cause}")]
    SourceReadFailure { location: String, cause: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl LedgerError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LedgerError::ConfigError { .. } | LedgerError::InvalidConfigValueError { .. }
        )
    }

    /// Short message suitable for printing to an operator's terminal.
    pub fn user_friendly_message(&self) -> String {
        match self {
            LedgerError::SourceNotFound { location } => {
                format!("Sales data file '{}' does not exist", location)
            }
            LedgerError::SourceReadFailure { location, .. } => {
                format!("Sales data file '{}' could not be read", location)
            }
            LedgerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LedgerError::SourceNotFound { .. } => {
                "Check the --source path or run with --create-sample to generate a sample ledger"
            }
            LedgerError::SourceReadFailure { .. } | LedgerError::IoError(_) => {
                "Check file permissions and that the file is a readable text file"
            }
            LedgerError::SerializationError(_) => "Retry with --format text",
            LedgerError::ConfigError { .. } | LedgerError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
