//! Messaging - commands, domain events and the consumption pipeline.
//!
//! Two independent channels share one consumption protocol: the command
//! queue carries imperative requests, the domain event queue carries facts
//! that already happened. Command handlers validate and emit domain events;
//! domain event handlers drive projection. Both channels are drained by a
//! [`QueueMessageConsumer`] that resolves a handler per message and treats
//! unroutable or unreadable messages as log-and-continue conditions - one
//! malformed message must not halt the pipeline.
//!
//! ```text
//! Command --> CommandQueue --> Consumer --> CommandHandler
//!                                               | emits
//!                                               v
//!            DomainEventQueue --> Consumer --> DomainEventHandler --> Projector
//! ```

mod consumer;
mod handler;
mod payload;
mod queue;

pub use consumer::{QueueMessageConsumer, MAX_MESSAGES_PER_RUN};
pub use handler::{
    CommandHandlerLocator, DomainEventHandlerLocator, HandlerError, HandlerLocator, LocatorError,
    MessageHandler, ProcessTimeLoggingDomainEventHandlerDecorator,
};
pub use payload::{InvalidPayload, MessagePayload};
pub use queue::{InMemoryQueue, Queue, QueueError};

use serde::{Deserialize, Serialize};

/// An immutable message: a logical type name plus a validated scalar-tree
/// payload.
///
/// Commands and domain events are both messages; the distinction is which
/// channel they travel and which locator resolves their handler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    name: String,
    payload: MessagePayload,
}

impl Message {
    pub fn new(name: impl Into<String>, payload: MessagePayload) -> Self {
        Message {
            name: name.into(),
            payload,
        }
    }

    /// Build a message from any serializable payload, validating the
    /// resulting tree.
    pub fn encode<T: Serialize>(
        name: impl Into<String>,
        payload: &T,
    ) -> Result<Self, InvalidPayload> {
        Ok(Message {
            name: name.into(),
            payload: MessagePayload::encode(payload)?,
        })
    }

    /// The logical message type, used for handler resolution.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &MessagePayload {
        &self.payload
    }

    /// Encode the message into a wire frame.
    pub(crate) fn to_frame(&self) -> Result<Vec<u8>, QueueError> {
        serde_json::to_vec(self).map_err(|e| QueueError::Codec(e.to_string()))
    }

    /// Decode a message from a wire frame.
    pub(crate) fn from_frame(frame: &[u8]) -> Result<Self, QueueError> {
        serde_json::from_slice(frame).map_err(|e| QueueError::Codec(e.to_string()))
    }
}
