use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// The unified error type for every datatasks operation
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Storage error: {message}")]
    Storage {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Validation error: {message}")]
    Validation {
        code: u16,
        message: String,
        field: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A value had the wrong type, e.g. a team name that is not text.
    #[error("[E{code:04}] Type error: {message}")]
    InvalidType {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Parse error: {message}")]
    Parse {
        code: u16,
        message: String,
        input: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Render error: {message}")]
    Render {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl TaskError {
    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_GENERIC, message)
    }

    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error with specific code and path
    pub fn storage_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Storage {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a validation error with specific code and field
    pub fn validation_with_code(
        code: u16,
        message: impl Into<String>,
        field: Option<String>,
    ) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            field,
            source: None,
        }
    }

    pub fn invalid_type(message: impl Into<String>) -> Self {
        Self::InvalidType {
            code: ErrorCode::VALIDATION_INVALID_TYPE,
            message: message.into(),
            source: None,
        }
    }

    /// Create a parse error remembering the offending input
    pub fn parse(code: u16, message: impl Into<String>, input: impl Into<String>) -> Self {
        Self::Parse {
            code,
            message: message.into(),
            input: Some(input.into()),
            source: None,
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            code: ErrorCode::RENDER_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Storage { source: src, .. }
            | Self::Validation { source: src, .. }
            | Self::InvalidType { source: src, .. }
            | Self::Parse { source: src, .. }
            | Self::Render { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Storage { message, .. }
            | Self::Validation { message, .. }
            | Self::InvalidType { message, .. }
            | Self::Parse { message, .. }
            | Self::Render { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Attach the path a storage error refers to
    pub fn with_path(mut self, new_path: impl Into<PathBuf>) -> Self {
        if let Self::Storage { path, .. } = &mut self {
            *path = Some(new_path.into());
        }
        self
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Storage { .. } => 4,
            Self::Validation { .. } => 8,
            Self::InvalidType { .. } => 9,
            Self::Parse { .. } => 10,
            Self::Render { .. } => 11,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Storage { code, .. }
            | Self::Validation { code, .. }
            | Self::InvalidType { code, .. }
            | Self::Parse { code, .. }
            | Self::Render { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::Storage { message, path, .. } => {
                if let Some(p) = path {
                    format!("Storage error at {}: {}", p.display(), message)
                } else {
                    format!("Storage error: {}", message)
                }
            }
            Self::Validation { message, field, .. } => {
                if let Some(f) = field {
                    format!("Validation error for '{}': {}", f, message)
                } else {
                    format!("Validation error: {}", message)
                }
            }
            Self::InvalidType { message, .. } => format!("Type error: {}", message),
            Self::Parse { message, input, .. } => {
                if let Some(i) = input {
                    format!("Could not parse '{}': {}", i, message)
                } else {
                    format!("Parse error: {}", message)
                }
            }
            Self::Render { message, .. } => format!("Could not render chart: {}", message),
        }
    }
}

/// Type alias for Results using TaskError
pub type Result<T> = std::result::Result<T, TaskError>;

impl From<std::io::Error> for TaskError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, message) = match err.kind() {
            ErrorKind::NotFound => (ErrorCode::STORAGE_NOT_FOUND, "File or directory not found"),
            ErrorKind::PermissionDenied => {
                (ErrorCode::STORAGE_PERMISSION_DENIED, "Permission denied")
            }
            ErrorKind::AlreadyExists => (ErrorCode::STORAGE_ALREADY_EXISTS, "Already exists"),
            _ => (ErrorCode::STORAGE_IO_ERROR, "IO operation failed"),
        };

        TaskError::storage_with_code(code, message, None).with_source(err)
    }
}

impl From<csv::Error> for TaskError {
    fn from(err: csv::Error) -> Self {
        TaskError::storage_with_code(ErrorCode::STORAGE_CSV_ERROR, "CSV operation failed", None)
            .with_source(err)
    }
}

impl From<chrono::ParseError> for TaskError {
    fn from(err: chrono::ParseError) -> Self {
        TaskError::Parse {
            code: ErrorCode::PARSE_INVALID_DATE,
            message: err.to_string(),
            input: None,
            source: None,
        }
        .with_source(err)
    }
}

impl From<toml::de::Error> for TaskError {
    fn from(err: toml::de::Error) -> Self {
        TaskError::config_with_code(ErrorCode::CONFIG_INVALID_TOML, "Invalid TOML syntax")
            .with_source(err)
    }
}

impl From<serde_json::Error> for TaskError {
    fn from(err: serde_json::Error) -> Self {
        TaskError::parse(
            ErrorCode::PARSE_GENERIC,
            "Invalid JSON syntax",
            err.to_string(),
        )
        .with_source(err)
    }
}

impl From<ndarray::ShapeError> for TaskError {
    fn from(err: ndarray::ShapeError) -> Self {
        TaskError::validation_with_code(
            ErrorCode::VALIDATION_SHAPE_MISMATCH,
            "Matrix dimensions do not match its data",
            None,
        )
        .with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let err = TaskError::config("Configuration file not found");
        assert!(matches!(err, TaskError::Config { .. }));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.code(), ErrorCode::CONFIG_GENERIC);

        let err = TaskError::validation_with_code(
            ErrorCode::VALIDATION_OUT_OF_RANGE,
            "Input epoch timestamp is in the future",
            Some("epoch_millis".to_string()),
        );
        assert!(matches!(err, TaskError::Validation { .. }));
        assert_eq!(err.exit_code(), 8);
        assert!(err.user_message().contains("'epoch_millis'"));

        let err = TaskError::invalid_type("Expected teams to be list of str");
        assert_eq!(err.code(), ErrorCode::VALIDATION_INVALID_TYPE);
        assert_eq!(err.exit_code(), 9);
    }

    #[test]
    fn test_error_creation_and_chaining() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "traffic_data.csv");
        let err = TaskError::storage_with_code(ErrorCode::STORAGE_IO_ERROR, "Cannot read file", None)
            .with_source(io_err)
            .with_context("while reloading traffic data")
            .with_path("output/traffic_data.csv");

        assert_eq!(err.code(), ErrorCode::STORAGE_IO_ERROR);
        assert!(err.to_string().contains("[E3001]"));
        assert!(err.user_message().contains("output/traffic_data.csv"));
        assert!(err.user_message().contains("while reloading traffic data"));
    }

    #[test]
    fn test_source_is_optional_and_exposed() {
        use std::error::Error as _;

        let bare = TaskError::render("no series to draw");
        assert!(bare.source().is_none());

        let io_err = std::io::Error::other("disk full");
        let wrapped = TaskError::render("could not write SVG").with_source(io_err);
        assert_eq!(wrapped.source().map(|s| s.to_string()), Some("disk full".to_string()));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: TaskError = io_err.into();
        assert_eq!(err.code(), ErrorCode::STORAGE_PERMISSION_DENIED);
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_parse_error_mentions_input() {
        let err = TaskError::parse(ErrorCode::PARSE_INVALID_DATE, "bad date", "2022-13-45");
        assert!(err.user_message().contains("2022-13-45"));
        assert!(err.to_string().contains("[E8001]"));
    }

    #[test]
    fn test_json_error_uses_parse_code() {
        let json_err = serde_json::from_str::<Vec<Vec<u8>>>("[[1,").unwrap_err();
        let err: TaskError = json_err.into();
        assert_eq!(err.code(), ErrorCode::PARSE_GENERIC);
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("[E8000]"));
    }

    #[test]
    fn test_chrono_error_conversion() {
        let chrono_err = chrono::NaiveDate::parse_from_str("2022-02-30", "%Y-%m-%d").unwrap_err();
        let err: TaskError = chrono_err.into();
        assert_eq!(err.code(), ErrorCode::PARSE_INVALID_DATE);
        assert_eq!(err.exit_code(), 10);
    }
}
