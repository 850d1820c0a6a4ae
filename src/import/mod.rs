//! Catalog import flow: commands in, domain events out, projections written.
//!
//! A command is an imperative request ("update this product"); its handler
//! validates the payload, records the fact as a domain event, and returns.
//! The event handler on the other channel drives the projector. The original
//! caller never observes the asynchronous half: once the command is queued
//! the only feedback channels are logs and the data pool itself.

use std::sync::Arc;

use crate::messaging::{HandlerError, Message, MessageHandler, MessagePayload, Queue};
use crate::product::{Product, ProductListing};
use crate::projection::{ProjectionSource, Projector};

pub const UPDATE_PRODUCT_COMMAND: &str = "update_product";
pub const PRODUCT_WAS_UPDATED_EVENT: &str = "product_was_updated";
pub const ADD_PRODUCT_LISTING_COMMAND: &str = "add_product_listing";
pub const PRODUCT_LISTING_WAS_ADDED_EVENT: &str = "product_listing_was_added";

/// Build the `update_product` command message.
///
/// Payload validation happens here, synchronously: a product that does not
/// reduce to a scalar tree is rejected before anything is enqueued.
pub fn update_product_command(product: &Product) -> Result<Message, HandlerError> {
    Ok(Message::new(
        UPDATE_PRODUCT_COMMAND,
        MessagePayload::encode(product)?,
    ))
}

/// Build the `add_product_listing` command message.
pub fn add_product_listing_command(listing: &ProductListing) -> Result<Message, HandlerError> {
    Ok(Message::new(
        ADD_PRODUCT_LISTING_COMMAND,
        MessagePayload::encode(listing)?,
    ))
}

/// Turns an `update_product` command into a `product_was_updated` event.
pub struct UpdateProductCommandHandler {
    event_queue: Arc<dyn Queue>,
}

impl UpdateProductCommandHandler {
    pub fn new(event_queue: Arc<dyn Queue>) -> Self {
        UpdateProductCommandHandler { event_queue }
    }
}

impl MessageHandler for UpdateProductCommandHandler {
    fn process(&self, message: &Message) -> Result<(), HandlerError> {
        // Decode to validate the shape, then carry the payload across
        // verbatim so the event replays byte-for-byte.
        let _: Product = message.payload().decode()?;
        self.event_queue.add(Message::new(
            PRODUCT_WAS_UPDATED_EVENT,
            message.payload().clone(),
        ))?;
        Ok(())
    }
}

/// Turns an `add_product_listing` command into a `product_listing_was_added`
/// event.
pub struct AddProductListingCommandHandler {
    event_queue: Arc<dyn Queue>,
}

impl AddProductListingCommandHandler {
    pub fn new(event_queue: Arc<dyn Queue>) -> Self {
        AddProductListingCommandHandler { event_queue }
    }
}

impl MessageHandler for AddProductListingCommandHandler {
    fn process(&self, message: &Message) -> Result<(), HandlerError> {
        let _: ProductListing = message.payload().decode()?;
        self.event_queue.add(Message::new(
            PRODUCT_LISTING_WAS_ADDED_EVENT,
            message.payload().clone(),
        ))?;
        Ok(())
    }
}

/// Projects the product carried by a `product_was_updated` event.
pub struct ProductWasUpdatedDomainEventHandler {
    projector: Arc<dyn Projector>,
}

impl ProductWasUpdatedDomainEventHandler {
    pub fn new(projector: Arc<dyn Projector>) -> Self {
        ProductWasUpdatedDomainEventHandler { projector }
    }
}

impl MessageHandler for ProductWasUpdatedDomainEventHandler {
    fn process(&self, message: &Message) -> Result<(), HandlerError> {
        let product: Product = message.payload().decode()?;
        self.projector.project(&ProjectionSource::Product(product))?;
        Ok(())
    }
}

/// Projects the listing carried by a `product_listing_was_added` event.
pub struct ProductListingWasAddedDomainEventHandler {
    projector: Arc<dyn Projector>,
}

impl ProductListingWasAddedDomainEventHandler {
    pub fn new(projector: Arc<dyn Projector>) -> Self {
        ProductListingWasAddedDomainEventHandler { projector }
    }
}

impl MessageHandler for ProductListingWasAddedDomainEventHandler {
    fn process(&self, message: &Message) -> Result<(), HandlerError> {
        let listing: ProductListing = message.payload().decode()?;
        self.projector.project(&ProjectionSource::Listing(listing))?;
        Ok(())
    }
}
