use thiserror::Error;

#[derive(Error, Debug)]
pub enum OkrError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Storage error for key '{key}': {message}")]
    StorageError { key: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl OkrError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OkrError::IoError(_) => ErrorCategory::Io,
            OkrError::SerializationError(_) => ErrorCategory::Data,
            OkrError::ConfigParseError(_) | OkrError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            OkrError::StorageError { .. } => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 針對錯誤類型給出修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            OkrError::IoError(_) => "Check that the storage directory exists and is writable",
            OkrError::SerializationError(_) => "Make sure the user info is a valid JSON object",
            OkrError::ConfigParseError(_) => "Check the TOML syntax of the configuration file",
            OkrError::InvalidConfigValueError { .. } => {
                "Fix the reported configuration value and try again"
            }
            OkrError::StorageError { .. } => "Clear the session storage directory and log in again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not access session storage: {}", self),
            ErrorCategory::Data => format!("Invalid user data: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Storage => format!("Session storage failure: {}", self),
        }
    }

    /// CLI 退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, OkrError>;
