//! The logger seam.
//!
//! Components receive their logger at construction as a [`SharedLogger`]
//! instead of reaching for a global. [`TracingLogger`] is the default sink and
//! forwards everything to the `tracing` facade.

use std::fmt;
use std::sync::Arc;

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        };
        f.write_str(s)
    }
}

/// A sink for leveled text messages.
pub trait Logger: Send + Sync {
    /// Emit one message.
    fn log(&self, level: LogLevel, message: &str);

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }
}

/// Logger handle shared between the components of one endpoint.
pub type SharedLogger = Arc<dyn Logger>;

/// Logger that forwards to `tracing`, tagging every event with a component name.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    /// Create a logger for the given component.
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    /// Create a shared handle for the given component.
    pub fn shared(component: &'static str) -> SharedLogger {
        Arc::new(Self::new(component))
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new("fieldlog")
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        let component = self.component;
        match level {
            LogLevel::Error => tracing::error!(component, "{}", message),
            LogLevel::Warn => tracing::warn!(component, "{}", message),
            LogLevel::Info => tracing::info!(component, "{}", message),
            LogLevel::Debug => tracing::debug!(component, "{}", message),
            LogLevel::Trace => tracing::trace!(component, "{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Capture(Mutex<Vec<(LogLevel, String)>>);

    impl Logger for Capture {
        fn log(&self, level: LogLevel, message: &str) {
            self.0.lock().unwrap().push((level, message.to_string()));
        }
    }

    #[test]
    fn test_default_methods_route_levels() {
        let capture = Capture::default();
        capture.warn("disk nearly full");
        capture.info("started");

        let lines = capture.0.lock().unwrap();
        assert_eq!(lines[0], (LogLevel::Warn, "disk nearly full".to_string()));
        assert_eq!(lines[1].0, LogLevel::Info);
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Trace);
        assert_eq!(LogLevel::Info.to_string(), "INFO");
    }

    #[test]
    fn test_tracing_logger_does_not_panic_without_subscriber() {
        let logger = TracingLogger::shared("storage");
        logger.log(LogLevel::Info, "no subscriber installed");
    }
}
