//! Error types for ledgerweb-core
//!
//! Error codes, severities, and detailed messages for the ledger store,
//! plus the logger used to report failures without exposing them to clients.

use thiserror::Error;
use std::path::Path;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// IO error
    IoError,
    /// Ledger file holds something other than a JSON array of objects
    CorruptLedger,
    /// Ledger could not be serialized
    SerializeError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::CorruptLedger => write!(f, "CORRUPT_LEDGER"),
            ErrorCode::SerializeError => write!(f, "SERIALIZE_ERROR"),
        }
    }
}

/// Detailed error information for logs
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning - the store can carry on with degraded data
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - application may be unstable
    Critical,
}

impl ErrorSeverity {
    /// Level the default logger reports this severity at
    pub fn log_level(&self) -> log::Level {
        match self {
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
        }
    }
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for ledgerweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Corrupt ledger {path}: {message}")]
    CorruptLedger { path: String, message: String },

    #[error("Serialization error: {message}")]
    Serialize { message: String },
}

impl CoreError {
    pub(crate) fn io(path: &Path, error: std::io::Error) -> Self {
        CoreError::Io {
            path: path.to_string_lossy().to_string(),
            message: error.to_string(),
        }
    }

    pub(crate) fn corrupt(path: &Path, error: serde_json::Error) -> Self {
        CoreError::CorruptLedger {
            path: path.to_string_lossy().to_string(),
            message: error.to_string(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Io { .. } => ErrorCode::IoError,
            CoreError::CorruptLedger { .. } => ErrorCode::CorruptLedger,
            CoreError::Serialize { .. } => ErrorCode::SerializeError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Io { .. } => ErrorSeverity::Error,
            CoreError::CorruptLedger { .. } => ErrorSeverity::Warning,
            CoreError::Serialize { .. } => ErrorSeverity::Critical,
        }
    }

    /// Whether a lenient read may replace this failure with an empty ledger
    pub fn is_read_recoverable(&self) -> bool {
        matches!(self, CoreError::Io { .. } | CoreError::CorruptLedger { .. })
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::Io { path, .. } => {
                details = details.with_detail(serde_json::json!({ "path": path }));
                details = details.with_suggestion(
                    "Check that the ledger directory exists and is writable.".to_string()
                );
            }
            CoreError::CorruptLedger { path, message } => {
                details = details.with_detail(serde_json::json!({ "path": path, "parse_message": message }));
                details = details.with_suggestion(
                    "The ledger must be a JSON array of objects.".to_string()
                );
                details = details.with_suggestion(
                    "The .backup file next to the ledger holds the content before the last write.".to_string()
                );
            }
            CoreError::Serialize { .. } => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::Serialize { message: error.to_string() }
    }
}

/// Error context for reporting
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    /// Log a warning
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default, Clone, Copy)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let severity = error.severity();
        log::log!(
            target: "ledgerweb::error",
            severity.log_level(),
            "{} [{}] {} - Operation: {} - Context: {}",
            severity.to_string().to_uppercase(),
            error.code(),
            error.to_details(),
            context.operation,
            context.data
        );
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "ledgerweb::error",
            "WARNING: {} - Operation: {} - Context: {}",
            message,
            context.operation,
            context.data
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::IoError.to_string(), "IO_ERROR");
        assert_eq!(ErrorCode::CorruptLedger.to_string(), "CORRUPT_LEDGER");
        assert_eq!(ErrorCode::SerializeError.to_string(), "SERIALIZE_ERROR");
    }

    #[test]
    fn test_error_severity_display() {
        assert_eq!(ErrorSeverity::Warning.to_string(), "warning");
        assert_eq!(ErrorSeverity::Error.to_string(), "error");
        assert_eq!(ErrorSeverity::Critical.to_string(), "critical");
    }

    #[test]
    fn test_severity_log_level() {
        assert_eq!(ErrorSeverity::Warning.log_level(), log::Level::Warn);
        assert_eq!(ErrorSeverity::Error.log_level(), log::Level::Error);
        assert_eq!(ErrorSeverity::Critical.log_level(), log::Level::Error);

        let corrupt = CoreError::CorruptLedger {
            path: "transactions.json".to_string(),
            message: "eof".to_string(),
        };
        assert_eq!(corrupt.severity().log_level(), log::Level::Warn);
    }

    #[test]
    fn test_core_error_code_and_severity() {
        let error = CoreError::CorruptLedger {
            path: "transactions.json".to_string(),
            message: "expected value".to_string(),
        };
        assert_eq!(error.code(), ErrorCode::CorruptLedger);
        assert_eq!(error.severity(), ErrorSeverity::Warning);
        assert!(error.is_read_recoverable());

        let error = CoreError::Serialize { message: "boom".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert!(!error.is_read_recoverable());
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = CoreError::io(Path::new("/data/transactions.json"), io);
        assert_eq!(error.code(), ErrorCode::IoError);
        assert!(error.to_string().contains("/data/transactions.json"));
        assert!(error.to_string().contains("denied"));
    }

    #[test]
    fn test_error_details_corrupt_ledger() {
        let error = CoreError::CorruptLedger {
            path: "transactions.json".to_string(),
            message: "trailing comma".to_string(),
        };
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::CorruptLedger);
        assert!(details.details.is_some());
        assert_eq!(details.suggestions.len(), 2);
        assert!(details.to_string().starts_with("[CORRUPT_LEDGER]"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("delete_transaction")
            .with_data("id", serde_json::json!("42"));

        assert_eq!(context.operation, "delete_transaction");
        assert_eq!(context.data["id"], "42");
    }
}
