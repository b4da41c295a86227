use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    NotFound(String),
    ValidationError(String),
    ParseError(String),
    IoError(String),
    ConfigError(String),
}

impl AppError {
    /// Expected failures are reported to the caller as an `error` payload,
    /// everything else is a server fault.
    pub fn is_expected(&self) -> bool {
        matches!(self, AppError::NotFound(_) | AppError::ValidationError(_))
    }

    /// The bare message, without the category prefix used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            AppError::Internal(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg)
            | AppError::ParseError(msg)
            | AppError::IoError(msg)
            | AppError::ConfigError(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_errors() {
        assert!(AppError::NotFound("x".to_string()).is_expected());
        assert!(AppError::ValidationError("x".to_string()).is_expected());
        assert!(!AppError::ParseError("x".to_string()).is_expected());
        assert!(!AppError::IoError("x".to_string()).is_expected());
    }

    #[test]
    fn test_message_has_no_prefix() {
        let err = AppError::NotFound("Arquivo não encontrado".to_string());
        assert_eq!(err.message(), "Arquivo não encontrado");
        assert_eq!(err.to_string(), "Not found: Arquivo não encontrado");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::IoError(ref msg) if msg.contains("denied")));
    }
}
