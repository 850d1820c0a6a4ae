//! Poll-driven queue consumer.

use std::sync::Arc;

use crate::logging::{LogMessage, Logger};

use super::{HandlerLocator, Queue};

/// Upper bound on messages drained per `process` call. Long backlogs are
/// worked off across repeated invocations so a single run stays bounded.
pub const MAX_MESSAGES_PER_RUN: usize = 200;

/// Drains a queue, dispatching each message to its registered handler.
///
/// One consumer serves one channel: a command consumer takes the command
/// queue and the command handler locator, a domain event consumer takes the
/// event queue and event handler locator. Failures on individual messages
/// are logged and skipped; the run keeps going so one bad message cannot
/// stall the channel.
pub struct QueueMessageConsumer {
    queue: Arc<dyn Queue>,
    locator: Arc<HandlerLocator>,
    logger: Arc<dyn Logger>,
}

impl QueueMessageConsumer {
    pub fn new(queue: Arc<dyn Queue>, locator: Arc<HandlerLocator>, logger: Arc<dyn Logger>) -> Self {
        QueueMessageConsumer {
            queue,
            locator,
            logger,
        }
    }

    /// Process up to [`MAX_MESSAGES_PER_RUN`] messages, returning the number
    /// actually consumed. Stops early when the queue runs dry.
    ///
    /// Every read attempt counts against the cap, failed reads included, so
    /// a transport that stays ready while erroring cannot spin a run forever.
    pub fn process(&self) -> usize {
        let mut consumed = 0;
        let mut attempts = 0;
        while attempts < MAX_MESSAGES_PER_RUN && self.queue.is_ready_for_next() {
            attempts += 1;
            let message = match self.queue.next() {
                Ok(message) => message,
                Err(e) => {
                    self.logger
                        .log(LogMessage::error(format!("failed to read message: {}", e)));
                    continue;
                }
            };
            consumed += 1;

            let handler = match self.locator.handler_for(&message) {
                Ok(handler) => handler,
                Err(e) => {
                    // A lookup miss means a producer we do not serve, not a
                    // broken pipeline; it is logged below error severity.
                    self.logger.log(
                        LogMessage::warning(e.to_string())
                            .with_context("message", message.name().to_string()),
                    );
                    continue;
                }
            };

            if let Err(e) = handler.process(&message) {
                self.logger.log(
                    LogMessage::error(format!("failed to process message: {}", e))
                        .with_context("message", message.name().to_string()),
                );
            }
        }
        consumed
    }
}
