//! Logging macros for ergonomic log message formatting.
//!
//! The per-type macros format their arguments like `format!` and log the
//! resulting string through the matching [`Logger`](crate::Logger) method.
//!
//! # Examples
//!
//! ```
//! use rust_log_facade::prelude::*;
//! use rust_log_facade::{info, log_args, success};
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! success!(logger, "Server listening on port {}", port);
//!
//! // Heterogeneous arguments, logged as separate values
//! logger.info(log_args!["user", 42, true]);
//! ```

/// Build a `Vec<LogArg>` from heterogeneous values.
///
/// # Examples
///
/// ```
/// use rust_log_facade::{log_args, LogArg};
///
/// let args = log_args!["retry", 3, 0.5];
/// assert_eq!(args.len(), 3);
/// assert_eq!(args[0], LogArg::from("retry"));
/// ```
#[macro_export]
macro_rules! log_args {
    () => {
        ::std::vec::Vec::<$crate::LogArg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        vec![$($crate::LogArg::from($arg)),+]
    };
}

/// Log a formatted message through a named type.
///
/// Evaluates to `Result<()>`; the type must exist in the logger's table.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # fn main() -> rust_log_facade::Result<()> {
/// # let logger = Logger::new();
/// use rust_log_facade::log;
/// log!(logger, "box", "Deploying {}", "v1.2.0")?;
/// log!(logger, "ready", "Listening")?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $log_type:expr, $($arg:tt)+) => {
        $logger.call($log_type, format!($($arg)+))
    };
}

/// Log a fatal message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(format!($($arg)+))
    };
}

/// Log an error message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_facade::error;
/// error!(logger, "Failed to connect: {}", "timeout");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format!($($arg)+))
    };
}

/// Log a warning.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_facade::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(format!($($arg)+))
    };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format!($($arg)+))
    };
}

/// Log a success message.
#[macro_export]
macro_rules! success {
    ($logger:expr, $($arg:tt)+) => {
        $logger.success(format!($($arg)+))
    };
}

/// Log a debug message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = Logger::builder().level(LogLevel::DEBUG).build();
/// use rust_log_facade::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(format!($($arg)+))
    };
}

/// Log a trace message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace(format!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::clock::ManualClock;
    use crate::core::pause::PauseController;
    use crate::prelude::*;
    use std::sync::Arc;

    fn logger_with(memory: &MemoryReporter) -> Logger {
        Logger::builder()
            .level(LogLevel::TRACE)
            .reporter(memory.clone())
            .clock(Arc::new(ManualClock::new()))
            .pause_controller(Arc::new(PauseController::new()))
            .build()
    }

    #[test]
    fn test_type_macros_format() {
        let memory = MemoryReporter::new();
        let logger = logger_with(&memory);

        crate::info!(logger, "port {}", 8080);
        crate::warn!(logger, "{} of {}", 1, 3);
        crate::trace!(logger, "enter");

        let records = memory.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].message(), "port 8080");
        assert_eq!(records[1].log_type, "warn");
        assert_eq!(records[2].level, LogLevel::TRACE);
    }

    #[test]
    fn test_log_macro_with_type_name() {
        let memory = MemoryReporter::new();
        let logger = logger_with(&memory);

        crate::log!(logger, "start", "job {}", 7).unwrap();
        assert!(crate::log!(logger, "missing", "x").is_err());
        assert_eq!(memory.records()[0].log_type, "start");
    }

    #[test]
    fn test_log_args() {
        let args = crate::log_args!["a", 1, false];
        assert_eq!(args, vec![LogArg::from("a"), LogArg::from(1), LogArg::from(false)]);
        assert!(crate::log_args![].is_empty());
    }
}
