//! Queue transport - at-least-once message channel with a single consumer
//! cursor.

use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use super::Message;

/// Error type for queue operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// `next()` was called while the queue was not ready. A race or misuse
    /// condition, not a normal failure.
    Underflow,
    /// A message frame could not be encoded or decoded.
    Codec(String),
    /// A queue lock was poisoned by a panicking producer.
    LockPoisoned(&'static str),
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::Underflow => write!(f, "queue has no message ready"),
            QueueError::Codec(msg) => write!(f, "message codec error: {}", msg),
            QueueError::LockPoisoned(operation) => {
                write!(f, "queue lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for QueueError {}

/// Message transport consumed by a single consumer.
///
/// Safe under concurrent enqueue from many producers; `is_ready_for_next`
/// and `next` belong to one consumer cursor and are not meant to be called
/// concurrently from two threads on the same queue instance.
pub trait Queue: Send + Sync {
    /// Enqueue a message.
    fn add(&self, message: Message) -> Result<(), QueueError>;

    /// Whether the transport has a message to offer.
    fn is_ready_for_next(&self) -> bool;

    /// Pull the next message; `Underflow` when not ready.
    fn next(&self) -> Result<Message, QueueError>;
}

/// In-memory queue for tests and single-process deployments.
///
/// Messages are stored as encoded frames in a shared append-only log; the
/// consumer cursor tracks its own read position, so a consumer picks up
/// where the previous invocation left off.
#[derive(Clone, Default)]
pub struct InMemoryQueue {
    log: Arc<RwLock<Vec<Vec<u8>>>>,
    position: Arc<Mutex<usize>>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages not yet consumed through this cursor.
    pub fn pending(&self) -> usize {
        let log_len = self.log.read().map(|log| log.len()).unwrap_or(0);
        let position = self.position.lock().map(|p| *p).unwrap_or(0);
        log_len.saturating_sub(position)
    }
}

impl Queue for InMemoryQueue {
    fn add(&self, message: Message) -> Result<(), QueueError> {
        let frame = message.to_frame()?;
        let mut log = self
            .log
            .write()
            .map_err(|_| QueueError::LockPoisoned("add"))?;
        log.push(frame);
        Ok(())
    }

    fn is_ready_for_next(&self) -> bool {
        self.pending() > 0
    }

    fn next(&self) -> Result<Message, QueueError> {
        let log = self
            .log
            .read()
            .map_err(|_| QueueError::LockPoisoned("next"))?;
        let mut position = self
            .position
            .lock()
            .map_err(|_| QueueError::LockPoisoned("next"))?;
        let frame = log.get(*position).ok_or(QueueError::Underflow)?;
        // Advance past the frame before decoding so a corrupt entry cannot
        // wedge the queue.
        *position += 1;
        Message::from_frame(frame)
    }
}
