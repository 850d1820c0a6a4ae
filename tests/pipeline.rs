mod support;

use std::collections::BTreeMap;

use projected_rust::{
    price_ranges, update_product_command, BrandAndGenderProductRelations, FullTextQuery, LogLevel,
    Message, MessagePayload, PageBounds, Product, ProductId, Queue, SearchCriteria,
    SortOrderConfig,
};
use serde_json::json;
use support::catalog::{context_data, listing, shoe, Engine};

#[test]
fn commands_flow_through_events_into_snippets_and_the_index() {
    let engine = Engine::new();

    engine
        .command_queue
        .add(update_product_command(&shoe("118", "Blue Runner", "Pooma", &["men"], 10000, "2016-01-01")).unwrap())
        .unwrap();
    engine
        .command_queue
        .add(
            projected_rust::add_product_listing_command(&listing("sneakers-men", "Sneakers for men"))
                .unwrap(),
        )
        .unwrap();

    assert_eq!(engine.command_consumer.process(), 2);
    assert_eq!(engine.event_queue.pending(), 2);
    assert_eq!(engine.event_consumer.process(), 2);

    let reader = &engine.reader;

    // The product snippet is cached under its deterministic key.
    let body = reader
        .get_snippet("product_json_118_v:1_w:ru_l:de_DE")
        .unwrap();
    let stored: Product = serde_json::from_str(&body).unwrap();
    assert_eq!(stored.id(), &ProductId::new("118"));

    // The listing title snippet too.
    assert_eq!(
        reader
            .get_snippet("listing_title_sneakers-men_v:1_w:ru_l:de_DE")
            .unwrap(),
        "Sneakers for men"
    );

    // The search document is queryable in the product's context, with
    // tax-inclusive prices derived per configured country.
    let context = engine
        .context_builder
        .create_context(&context_data())
        .unwrap();
    let ids = reader
        .product_ids_matching_criteria(
            &SearchCriteria::and(vec![
                SearchCriteria::equal("brand", "Pooma"),
                SearchCriteria::greater_than("price_incl_tax_de", "11000"),
            ]),
            context.as_ref(),
            &SortOrderConfig::asc("created_at"),
            PageBounds::new(10, 1),
        )
        .unwrap();
    assert_eq!(ids, vec![ProductId::new("118")]);

    // Each successful domain event process leaves one timing log record.
    let messages = engine.logger.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages
        .iter()
        .any(|m| m.starts_with("DomainEventHandler::process product_was_updated ")));
    assert!(messages
        .iter()
        .any(|m| m.starts_with("DomainEventHandler::process product_listing_was_added ")));
}

#[test]
fn unroutable_messages_are_logged_and_skipped() {
    let engine = Engine::new();

    engine
        .command_queue
        .add(Message::new(
            "rename_warehouse",
            MessagePayload::new(json!({"id": "1"})).unwrap(),
        ))
        .unwrap();
    engine
        .command_queue
        .add(update_product_command(&shoe("7", "Shoe", "Pooma", &["men"], 5000, "2016-01-01")).unwrap())
        .unwrap();

    assert_eq!(engine.command_consumer.process(), 2);
    assert_eq!(engine.event_queue.pending(), 1);
    assert_eq!(engine.logger.records().len(), 1);
    assert_eq!(engine.logger.records()[0].level(), LogLevel::Warning);
    assert!(engine.logger.messages()[0].contains("rename_warehouse"));
}

#[test]
fn related_products_resolve_through_the_cached_snippet_and_the_index() {
    let engine = Engine::new();

    for product in [
        shoe("1", "Blue Runner", "Pooma", &["men", "unisex"], 10000, "2016-01-01"),
        shoe("2", "Red Runner", "Pooma", &["men"], 11000, "2016-03-01"),
        shoe("3", "Heels", "Pooma", &["women"], 12000, "2016-02-01"),
        shoe("4", "Boots", "Adadis", &["men"], 9000, "2016-04-01"),
        shoe("5", "Slides", "Pooma", &["unisex"], 4000, "2016-02-15"),
    ] {
        engine
            .command_queue
            .add(update_product_command(&product).unwrap())
            .unwrap();
    }
    engine.command_consumer.process();
    engine.event_consumer.process();

    let relations = BrandAndGenderProductRelations::new(
        engine.reader.clone(),
        engine.product_json_key_generator.clone(),
    );
    let context = engine
        .context_builder
        .create_context(&context_data())
        .unwrap();

    let related = relations
        .related_product_ids(&ProductId::new("1"), context.as_ref())
        .unwrap();
    assert_eq!(related, vec![ProductId::new("5"), ProductId::new("2")]);
}

#[test]
fn full_text_search_returns_price_facets() {
    let engine = Engine::new();

    for product in [
        shoe("1", "Blue Runner", "Pooma", &["men"], 1500, "2016-01-01"),
        shoe("2", "Red Runner", "Pooma", &["men"], 2500, "2016-02-01"),
        shoe("3", "Green Runner", "Pooma", &["men"], 52000, "2016-03-01"),
    ] {
        engine
            .command_queue
            .add(update_product_command(&product).unwrap())
            .unwrap();
    }
    engine.command_consumer.process();
    engine.event_consumer.process();

    let context = engine
        .context_builder
        .create_context(&context_data())
        .unwrap();
    let filters = BTreeMap::new();
    let response = engine
        .reader
        .search_results_matching_string(
            &FullTextQuery {
                text: "runner",
                filters: &filters,
                facet_codes: &["brand".to_string()],
                page: PageBounds::new(10, 1),
            },
            context.as_ref(),
            &SortOrderConfig::asc("created_at"),
        )
        .unwrap();

    assert_eq!(
        response.product_ids,
        vec![ProductId::new("1"), ProductId::new("2"), ProductId::new("3")]
    );
    let brand_facet = response
        .facet_fields
        .iter()
        .find(|f| f.code == "brand")
        .unwrap();
    assert_eq!(brand_facet.values[0].count, 3);

    // The price ladder buckets the stored prices deterministically.
    let ranges = price_ranges(2000, 50000);
    let bucket_of = |price: i64| ranges.iter().position(|r| r.contains(price)).unwrap();
    assert_eq!(bucket_of(1500), 0);
    assert_eq!(bucket_of(2500), 1);
    assert_eq!(bucket_of(52000), ranges.len() - 1);
}
