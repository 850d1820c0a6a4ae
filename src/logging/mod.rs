//! Logging capability consumed by the consumer loop and handler decorators.
//!
//! The pipeline is fire-and-forget once a message is enqueued, so logs are
//! the only place asynchronous failures become observable. The [`Logger`]
//! trait is the capability handlers and consumers write to; production wires
//! it to [`TracingLogger`] (the `tracing` ecosystem), tests to
//! [`InMemoryLogger`].

use std::fmt;
use std::sync::{Arc, Mutex};

/// Severity of a log record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

/// One structured log record: a message plus key/value context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogMessage {
    level: LogLevel,
    message: String,
    context: Vec<(String, String)>,
}

impl LogMessage {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        LogMessage {
            level,
            message: message.into(),
            context: Vec::new(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    /// Attach a key/value pair to the record.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for (key, value) in &self.context {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

/// Capability accepting structured log records.
pub trait Logger: Send + Sync {
    fn log(&self, message: LogMessage);
}

/// Forwards records to the `tracing` subscriber in scope.
#[derive(Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        TracingLogger
    }
}

impl Logger for TracingLogger {
    fn log(&self, message: LogMessage) {
        match message.level() {
            LogLevel::Info => tracing::info!(context = ?message.context(), "{}", message.message()),
            LogLevel::Warning => {
                tracing::warn!(context = ?message.context(), "{}", message.message());
            }
            LogLevel::Error => {
                tracing::error!(context = ?message.context(), "{}", message.message());
            }
        }
    }
}

/// Records everything it is given; the test double for log assertions.
#[derive(Clone, Default)]
pub struct InMemoryLogger {
    records: Arc<Mutex<Vec<LogMessage>>>,
}

impl InMemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records logged so far, in order.
    pub fn records(&self) -> Vec<LogMessage> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Just the record messages, for terse assertions.
    pub fn messages(&self) -> Vec<String> {
        self.records()
            .iter()
            .map(|r| r.message().to_string())
            .collect()
    }
}

impl Logger for InMemoryLogger {
    fn log(&self, message: LogMessage) {
        if let Ok(mut records) = self.records.lock() {
            records.push(message);
        }
    }
}
