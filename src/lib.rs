mod config;
mod context;
mod data_pool;
mod import;
mod key;
mod logging;
mod messaging;
mod price;
mod product;
mod projection;
mod relations;
mod search;
mod tax;

pub use config::{Config, ConfigBuilder};
pub use context::{
    Context, ContextBuilder, ContextData, ContextError, ContextSource, DataVersion,
    LocaleContextDecorator, VersionedContext, WebsiteContextDecorator,
};
pub use data_pool::{
    DataPoolError, DataPoolReader, DataPoolWriter, FullTextQuery, InMemoryKeyValueStore,
    InMemorySearchEngine, KeyValueStore, PageBounds, SearchEngine, SearchEngineResponse,
};
pub use import::{
    add_product_listing_command, update_product_command, AddProductListingCommandHandler,
    ProductListingWasAddedDomainEventHandler, ProductWasUpdatedDomainEventHandler,
    UpdateProductCommandHandler, ADD_PRODUCT_LISTING_COMMAND, PRODUCT_LISTING_WAS_ADDED_EVENT,
    PRODUCT_WAS_UPDATED_EVENT, UPDATE_PRODUCT_COMMAND,
};
pub use key::{
    GenericSnippetKeyGenerator, SnippetKeyData, SnippetKeyError, SnippetKeyGenerator,
    SnippetKeyGeneratorLocator,
};
pub use logging::{InMemoryLogger, LogLevel, LogMessage, Logger, TracingLogger};
pub use messaging::{
    CommandHandlerLocator, DomainEventHandlerLocator, HandlerError, HandlerLocator, InMemoryQueue,
    InvalidPayload, LocatorError, Message, MessageHandler, MessagePayload,
    ProcessTimeLoggingDomainEventHandlerDecorator, Queue, QueueError, QueueMessageConsumer,
    MAX_MESSAGES_PER_RUN,
};
pub use price::Price;
pub use product::{
    AttributeValueCollector, AttributeValueCollectorLocator, ConfigurableAttributeValueCollector,
    ConfigurableProduct, DefaultAttributeValueCollector, Product, ProductAttributes, ProductId,
    ProductListing, ProductSearchDocumentBuilder, SimpleProduct,
};
pub use projection::{
    PageTemplateSnippetRenderer, ProductJsonSnippetRenderer, ProductListingSnippetProjector,
    ProductListingTitleSnippetRenderer, ProductProjector, ProjectionError, ProjectionSource,
    Projector, Snippet, SnippetRenderer, SnippetRendererCollection, TemplateProjector,
};
pub use relations::{BrandAndGenderProductRelations, RelationsError};
pub use search::{
    price_ranges, FacetField, FacetFieldValue, FacetFilterRange, Operation, SearchCriteria,
    SearchCriterion, SearchDocument, SearchDocumentFieldCollection, SortOrderConfig,
    SortOrderDirection,
};
pub use tax::{InMemoryTaxRateProvider, TaxError, TaxRate, TaxRateProvider, TaxRateQuery};
