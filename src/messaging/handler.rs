//! Message handlers and their resolution.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::data_pool::DataPoolError;
use crate::logging::{LogMessage, Logger};
use crate::projection::ProjectionError;

use super::{InvalidPayload, Message, QueueError};

/// Error type for message processing.
#[derive(Debug)]
pub enum HandlerError {
    /// The message payload did not decode into the expected shape.
    Payload(String),
    /// Emitting a follow-up message failed.
    Queue(QueueError),
    /// Projection of the message failed.
    Projection(ProjectionError),
    /// A data pool operation failed.
    DataPool(DataPoolError),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::Payload(msg) => write!(f, "invalid handler payload: {}", msg),
            HandlerError::Queue(e) => write!(f, "queue error: {}", e),
            HandlerError::Projection(e) => write!(f, "projection error: {}", e),
            HandlerError::DataPool(e) => write!(f, "data pool error: {}", e),
        }
    }
}

impl std::error::Error for HandlerError {}

impl From<QueueError> for HandlerError {
    fn from(e: QueueError) -> Self {
        HandlerError::Queue(e)
    }
}

impl From<ProjectionError> for HandlerError {
    fn from(e: ProjectionError) -> Self {
        HandlerError::Projection(e)
    }
}

impl From<DataPoolError> for HandlerError {
    fn from(e: DataPoolError) -> Self {
        HandlerError::DataPool(e)
    }
}

impl From<InvalidPayload> for HandlerError {
    fn from(e: InvalidPayload) -> Self {
        HandlerError::Payload(e.to_string())
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(e: serde_json::Error) -> Self {
        HandlerError::Payload(e.to_string())
    }
}

/// Processes one message. Command handlers and domain event handlers share
/// this shape; the channel they are registered on gives them their role.
pub trait MessageHandler: Send + Sync {
    fn process(&self, message: &Message) -> Result<(), HandlerError>;
}

/// Error type for handler resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// No handler is registered for the message name.
    NotFound(String),
    /// A handler is already registered for the message name.
    Duplicate(String),
}

impl fmt::Display for LocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorError::NotFound(name) => {
                write!(f, "unable to find a handler for message '{}'", name)
            }
            LocatorError::Duplicate(name) => {
                write!(f, "a handler is already registered for message '{}'", name)
            }
        }
    }
}

impl std::error::Error for LocatorError {}

/// Registry resolving a handler by the message's logical type.
///
/// Populated at startup; lookups return an explicit found/not-found result
/// rather than relying on dynamic dispatch tricks. One locator instance
/// serves one channel (commands or domain events).
#[derive(Default)]
pub struct HandlerLocator {
    handlers: HashMap<String, Arc<dyn MessageHandler>>,
}

impl HandlerLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<(), LocatorError> {
        let name = name.into();
        if self.handlers.contains_key(&name) {
            return Err(LocatorError::Duplicate(name));
        }
        self.handlers.insert(name, handler);
        Ok(())
    }

    pub fn handler_for(&self, message: &Message) -> Result<Arc<dyn MessageHandler>, LocatorError> {
        self.handlers
            .get(message.name())
            .cloned()
            .ok_or_else(|| LocatorError::NotFound(message.name().to_string()))
    }
}

/// Command handlers resolve through the same registry shape as domain event
/// handlers; the aliases keep wiring code explicit about which channel a
/// locator serves.
pub type CommandHandlerLocator = HandlerLocator;
pub type DomainEventHandlerLocator = HandlerLocator;

/// Wraps a domain event handler and logs the processing time of each
/// successful call.
///
/// The log message shape is `DomainEventHandler::process <EventName>
/// <elapsedSeconds>`, which operational monitoring parses for projection
/// latency.
pub struct ProcessTimeLoggingDomainEventHandlerDecorator {
    inner: Arc<dyn MessageHandler>,
    logger: Arc<dyn Logger>,
}

impl ProcessTimeLoggingDomainEventHandlerDecorator {
    pub fn new(inner: Arc<dyn MessageHandler>, logger: Arc<dyn Logger>) -> Self {
        ProcessTimeLoggingDomainEventHandlerDecorator { inner, logger }
    }
}

impl MessageHandler for ProcessTimeLoggingDomainEventHandlerDecorator {
    fn process(&self, message: &Message) -> Result<(), HandlerError> {
        let start = Instant::now();
        self.inner.process(message)?;
        let elapsed = start.elapsed().as_secs_f64();
        self.logger.log(LogMessage::info(format!(
            "DomainEventHandler::process {} {:.6}",
            message.name(),
            elapsed
        )));
        Ok(())
    }
}
