//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A capability was requested that this logger was not configured with
    #[error("{capability} is not supported!")]
    UnsupportedCapability { capability: String },

    /// Log call for a type missing from the logger's type table
    #[error("Unknown log type '{name}'")]
    UnknownLogType { name: String },

    /// A reporter failed while handling a record
    #[error("Reporter '{reporter}' failed: {message}")]
    ReporterFailed { reporter: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported capability error
    pub fn unsupported(capability: impl Into<String>) -> Self {
        LoggerError::UnsupportedCapability {
            capability: capability.into(),
        }
    }

    pub fn unknown_type(name: impl Into<String>) -> Self {
        LoggerError::UnknownLogType { name: name.into() }
    }

    /// Create a reporter failure error
    pub fn reporter(reporter: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::ReporterFailed {
            reporter: reporter.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("LoggerConfig", "throttle_ms must be greater than 0");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::unsupported("prompt");
        assert!(matches!(err, LoggerError::UnsupportedCapability { .. }));

        let err = LoggerError::reporter("json", "disk full");
        assert!(matches!(err, LoggerError::ReporterFailed { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::unsupported("prompt");
        assert_eq!(err.to_string(), "prompt is not supported!");

        let err = LoggerError::unknown_type("notice");
        assert_eq!(err.to_string(), "Unknown log type 'notice'");

        let err = LoggerError::reporter("basic", "broken pipe");
        assert_eq!(err.to_string(), "Reporter 'basic' failed: broken pipe");

        let err = LoggerError::config("Logger", "no prompter");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for Logger: no prompter"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LoggerError = json_err.into();
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
