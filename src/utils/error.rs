use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Validation error on '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Persistence error: {message}")]
    PersistenceError { message: String },

    #[error("Import of '{path}' failed: {reason}")]
    ImportParseError { path: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Persistence,
    Import,
    Configuration,
    System,
}

impl RosterError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RosterError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        RosterError::PersistenceError {
            message: message.into(),
        }
    }

    pub fn import(path: impl Into<String>, reason: impl Into<String>) -> Self {
        RosterError::ImportParseError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RosterError::ValidationError { .. } => ErrorCategory::Validation,
            RosterError::PersistenceError { .. } => ErrorCategory::Persistence,
            RosterError::ImportParseError { .. } => ErrorCategory::Import,
            RosterError::ConfigError { .. } => ErrorCategory::Configuration,
            RosterError::IoError(_) => ErrorCategory::System,
        }
    }

    /// Only a rejected commit is worth retrying; pending persons survive it.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RosterError::PersistenceError { .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Correct the highlighted field and save again",
            ErrorCategory::Persistence => {
                "Pending persons were kept; check the data directory and retry the save"
            }
            ErrorCategory::Import => "Check that the file exists and is valid JSON or CSV",
            ErrorCategory::Configuration => "Fix the configuration file and restart",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
