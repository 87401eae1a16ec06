use thiserror::Error;

#[derive(Error, Debug)]
pub enum SorterError {
    #[error("Bookmark store read failed during {operation}: {message}")]
    StoreRead { operation: String, message: String },

    #[error("Bookmark store write failed during {operation}: {message}")]
    StoreWrite { operation: String, message: String },

    #[error("Bookmark node not found: {id}")]
    NodeNotFound { id: String },

    #[error("Bookmark tree has no roots")]
    EmptyTree,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Store,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SorterError {
    pub fn store_read(operation: &str, message: impl Into<String>) -> Self {
        Self::StoreRead {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn store_write(operation: &str, message: impl Into<String>) -> Self {
        Self::StoreWrite {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StoreRead { .. }
            | Self::StoreWrite { .. }
            | Self::NodeNotFound { .. }
            | Self::EmptyTree => ErrorCategory::Store,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // a re-run fetches the tree again and clears partial state
            Self::StoreRead { .. } | Self::StoreWrite { .. } => ErrorSeverity::Medium,
            Self::NodeNotFound { .. } | Self::EmptyTree => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::StoreRead { .. } => "Could not read the bookmark tree.".to_string(),
            Self::StoreWrite { .. } => "Could not update the bookmark tree.".to_string(),
            Self::NodeNotFound { id } => format!("Bookmark node '{}' does not exist.", id),
            Self::EmptyTree => "The bookmark store is empty.".to_string(),
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::SerializationError(e) => format!("Bookmark data is malformed: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            Self::MissingConfigError { field } => {
                format!("Configuration field '{}' is required.", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Store => {
                "Run the command again; an interrupted apply is repaired by the next run"
            }
            ErrorCategory::Configuration => "Check the TOML configuration and command-line flags",
            ErrorCategory::System => "Check that the bookmark file exists and contains valid JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, SorterError>;
