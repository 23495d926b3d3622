use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed JSON in {path}: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Day directory '{name}' is not a date (expected MM-DD-YYYY or YYYY-MM-DD)")]
    InvalidDayError { name: String },

    #[error("Unexpected dataset shape in {path}: {message}")]
    DatasetShapeError { path: String, message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AtlasError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AtlasError::IoError(_) => ErrorCategory::System,
            AtlasError::JsonError { .. }
            | AtlasError::InvalidDayError { .. }
            | AtlasError::DatasetShapeError { .. } => ErrorCategory::Data,
            AtlasError::ConfigValidationError { .. }
            | AtlasError::InvalidConfigValueError { .. }
            | AtlasError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AtlasError::IoError(_) => "Check that the data directory exists and is readable",
            AtlasError::JsonError { .. } => "Regenerate or fix the named data file; partial data is never served",
            AtlasError::InvalidDayError { .. } => "Rename the directory to a date or remove it from the data root",
            AtlasError::DatasetShapeError { .. } => "Check the file against the expected dataset layout",
            AtlasError::ConfigValidationError { .. }
            | AtlasError::InvalidConfigValueError { .. } => "Fix the configuration value and try again",
            AtlasError::MissingConfigError { .. } => "Provide the missing value in the config file or on the command line",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Data => format!("Could not load dataset: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;
