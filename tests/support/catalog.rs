//! A fully wired engine instance plus catalog fixtures.

use std::sync::Arc;

use projected_rust::{
    AddProductListingCommandHandler, Config, ContextBuilder, ContextData, DataPoolReader,
    DataPoolWriter, DataVersion, GenericSnippetKeyGenerator, HandlerLocator, InMemoryKeyValueStore,
    InMemoryLogger, InMemoryQueue, InMemorySearchEngine, InMemoryTaxRateProvider, KeyValueStore,
    Logger, ProcessTimeLoggingDomainEventHandlerDecorator, Product, ProductAttributes, ProductId,
    ProductJsonSnippetRenderer, ProductListing, ProductListingSnippetProjector,
    ProductListingTitleSnippetRenderer, ProductListingWasAddedDomainEventHandler,
    ProductProjector, ProductSearchDocumentBuilder, ProductWasUpdatedDomainEventHandler, Queue,
    QueueMessageConsumer, SimpleProduct, SnippetKeyGenerator, SnippetKeyGeneratorLocator,
    SnippetRendererCollection, TaxRate, TaxRateQuery, UpdateProductCommandHandler,
    PRODUCT_LISTING_WAS_ADDED_EVENT, PRODUCT_WAS_UPDATED_EVENT,
};
use serde_json::json;

pub const PRODUCT_JSON_CODE: &str = "product_json";
pub const LISTING_TITLE_CODE: &str = "listing_title";

/// The whole pipeline wired against in-memory infrastructure.
pub struct Engine {
    pub command_queue: Arc<InMemoryQueue>,
    pub event_queue: Arc<InMemoryQueue>,
    pub command_consumer: QueueMessageConsumer,
    pub event_consumer: QueueMessageConsumer,
    pub reader: DataPoolReader,
    pub context_builder: Arc<ContextBuilder>,
    pub product_json_key_generator: Arc<dyn SnippetKeyGenerator>,
    pub logger: InMemoryLogger,
}

impl Engine {
    pub fn new() -> Self {
        let config = Config::builder()
            .taxable_countries(vec!["DE".to_string(), "FR".to_string()])
            .index_attribute_codes(vec![
                "brand".to_string(),
                "gender".to_string(),
                "price".to_string(),
                "created_at".to_string(),
                "name".to_string(),
            ])
            .build();

        let store = Arc::new(InMemoryKeyValueStore::new());
        let engine = Arc::new(InMemorySearchEngine::new());
        let context_builder = Arc::new(ContextBuilder::new(
            DataVersion::new("1").unwrap(),
            config.default_locale.clone(),
        ));
        let logger = InMemoryLogger::new();

        let writer = DataPoolWriter::new(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            Arc::clone(&engine) as _,
        );
        let reader = DataPoolReader::new(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            Arc::clone(&engine) as _,
        );

        let mut key_generators = SnippetKeyGeneratorLocator::new();
        key_generators
            .register(
                PRODUCT_JSON_CODE,
                Arc::new(GenericSnippetKeyGenerator::new(
                    PRODUCT_JSON_CODE,
                    &["product_id"],
                )),
            )
            .unwrap();
        key_generators
            .register(
                LISTING_TITLE_CODE,
                Arc::new(GenericSnippetKeyGenerator::new(
                    LISTING_TITLE_CODE,
                    &["url_key"],
                )),
            )
            .unwrap();
        let product_json_key_generator = key_generators
            .key_generator_for_snippet_code(PRODUCT_JSON_CODE)
            .unwrap();
        let tax_rate_provider = Arc::new(
            InMemoryTaxRateProvider::new()
                .with_rate(TaxRateQuery::new("ru", "shoes", "DE"), TaxRate::new(19.0))
                .with_rate(TaxRateQuery::new("ru", "shoes", "FR"), TaxRate::new(20.0)),
        );

        let product_projector = Arc::new(ProductProjector::new(
            SnippetRendererCollection::new().add(Box::new(ProductJsonSnippetRenderer::new(
                Arc::clone(&product_json_key_generator),
            ))),
            Arc::new(ProductSearchDocumentBuilder::new(
                config.index_attribute_codes.clone(),
                config.taxable_countries.clone(),
                tax_rate_provider,
                Arc::clone(&context_builder),
            )),
            Arc::clone(&context_builder),
            writer.clone(),
        ));
        let listing_projector = Arc::new(ProductListingSnippetProjector::new(
            SnippetRendererCollection::new().add(Box::new(
                ProductListingTitleSnippetRenderer::new(
                    key_generators
                        .key_generator_for_snippet_code(LISTING_TITLE_CODE)
                        .unwrap(),
                ),
            )),
            Arc::clone(&context_builder),
            writer,
        ));

        let command_queue = Arc::new(InMemoryQueue::new());
        let event_queue = Arc::new(InMemoryQueue::new());
        let shared_logger: Arc<dyn Logger> = Arc::new(logger.clone());

        let mut command_locator = HandlerLocator::new();
        command_locator
            .register(
                projected_rust::UPDATE_PRODUCT_COMMAND,
                Arc::new(UpdateProductCommandHandler::new(
                    Arc::clone(&event_queue) as Arc<dyn Queue>
                )),
            )
            .unwrap();
        command_locator
            .register(
                projected_rust::ADD_PRODUCT_LISTING_COMMAND,
                Arc::new(AddProductListingCommandHandler::new(
                    Arc::clone(&event_queue) as Arc<dyn Queue>,
                )),
            )
            .unwrap();

        let mut event_locator = HandlerLocator::new();
        event_locator
            .register(
                PRODUCT_WAS_UPDATED_EVENT,
                Arc::new(ProcessTimeLoggingDomainEventHandlerDecorator::new(
                    Arc::new(ProductWasUpdatedDomainEventHandler::new(product_projector)),
                    Arc::clone(&shared_logger),
                )),
            )
            .unwrap();
        event_locator
            .register(
                PRODUCT_LISTING_WAS_ADDED_EVENT,
                Arc::new(ProcessTimeLoggingDomainEventHandlerDecorator::new(
                    Arc::new(ProductListingWasAddedDomainEventHandler::new(
                        listing_projector,
                    )),
                    Arc::clone(&shared_logger),
                )),
            )
            .unwrap();

        let command_consumer = QueueMessageConsumer::new(
            Arc::clone(&command_queue) as Arc<dyn Queue>,
            Arc::new(command_locator),
            Arc::clone(&shared_logger),
        );
        let event_consumer = QueueMessageConsumer::new(
            Arc::clone(&event_queue) as Arc<dyn Queue>,
            Arc::new(event_locator),
            shared_logger,
        );

        Engine {
            command_queue,
            event_queue,
            command_consumer,
            event_consumer,
            reader,
            context_builder,
            product_json_key_generator,
            logger,
        }
    }
}

pub fn context_data() -> ContextData {
    [
        ("website".to_string(), "ru".to_string()),
        ("locale".to_string(), "de_DE".to_string()),
    ]
    .into()
}

pub fn shoe(id: &str, name: &str, brand: &str, genders: &[&str], price: i64, created_at: &str) -> Product {
    let mut attributes = ProductAttributes::new();
    attributes.set("name", json!(name));
    attributes.set("brand", json!(brand));
    attributes.set_all("gender", genders.iter().map(|g| json!(g)).collect());
    attributes.set("price", json!(price));
    attributes.set("created_at", json!(created_at));
    Product::Simple(SimpleProduct::new(
        ProductId::new(id),
        "shoes",
        attributes,
        context_data(),
    ))
}

pub fn listing(url_key: &str, title: &str) -> ProductListing {
    let mut attributes = ProductAttributes::new();
    attributes.set("meta_title", json!(title));
    ProductListing::new(url_key, attributes, context_data())
}
