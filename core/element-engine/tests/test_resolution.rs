//! FILENAME: tests/test_resolution.rs
//! Integration tests for classification, aggregate, display name and sort key resolution.

mod common;

use common::{SalesFixture, TestHarness};
use element_engine::{
    AggregateFunction, CatalogError, Classification, ColumnCatalogEntry, ColumnType,
    DictionaryTranslator, InMemoryCatalog, PivotPosition, ReportElement, SortOrder,
};
use std::sync::Arc;

// ============================================================================
// CLASSIFICATION
// ============================================================================

#[test]
fn test_classification_follows_catalog_type() {
    let harness = TestHarness::new();
    assert_eq!(harness.element(SalesFixture::AMOUNT).classification(), Classification::Numeric);
    assert_eq!(harness.element(SalesFixture::REGION).classification(), Classification::Text);
    assert_eq!(
        harness.element(SalesFixture::ORDER_DATE).classification(),
        Classification::DateTime
    );
    assert_eq!(harness.element(SalesFixture::STATUS).classification(), Classification::Enum);
}

#[test]
fn test_count_data_is_always_numeric() {
    let harness = TestHarness::new();
    let columns = [
        SalesFixture::AMOUNT,
        SalesFixture::REGION,
        SalesFixture::ORDER_DATE,
        SalesFixture::STATUS,
        SalesFixture::NOTES,
    ];
    for column in columns {
        let mut element = harness.element(column);
        element.set_pivot_position(PivotPosition::Data);
        element.set_aggregate_function(AggregateFunction::Count);
        assert_eq!(element.classification(), Classification::Numeric, "column {}", column);
        assert!(element.is_numeric());
    }
}

#[test]
fn test_count_outside_data_keeps_type() {
    let harness = TestHarness::new();
    let mut element = harness.element(SalesFixture::REGION);
    element.set_aggregate_function(AggregateFunction::Count);
    assert_eq!(element.classification(), Classification::Text);
}

#[test]
fn test_type_override_wins() {
    let harness = TestHarness::new();
    let mut element = harness.element(SalesFixture::QUANTITY);
    element.set_column_type(ColumnType::Text);
    assert_eq!(element.classification(), Classification::Text);
    assert_eq!(element.resolved_column_type(), ColumnType::Text);
}

#[test]
fn test_unresolved_column_degrades_to_text() {
    let harness = TestHarness::new();
    let element = harness.element("unknown");
    assert_eq!(element.classification(), Classification::Text);
    assert_eq!(element.display_name(), "");
    assert_eq!(element.sql_column(), "");
    assert!(matches!(element.try_column(), Err(CatalogError::ColumnNotFound(_))));
}

#[test]
fn test_empty_reference_reported() {
    let element = ReportElement::create();
    assert_eq!(element.try_column().unwrap_err(), CatalogError::NoColumnReference);
    assert_eq!(element.classification(), Classification::Text);
}

// ============================================================================
// DEFAULT AGGREGATE
// ============================================================================

#[test]
fn test_default_aggregate_by_classification() {
    let harness = TestHarness::new();
    let cases = [
        (SalesFixture::STATUS, AggregateFunction::Count),
        (SalesFixture::AMOUNT, AggregateFunction::Sum),
        (SalesFixture::ORDER_DATE, AggregateFunction::Max),
        (SalesFixture::REGION, AggregateFunction::Count),
    ];
    for (column, expected) in cases {
        assert_eq!(harness.element(column).default_aggregate(), expected, "column {}", column);
    }
}

#[test]
fn test_default_aggregate_idempotent() {
    let harness = TestHarness::new();
    for column in [SalesFixture::AMOUNT, SalesFixture::ORDER_DATE, SalesFixture::STATUS] {
        let mut element = harness.data_element(column);
        let first = element.aggregate_function();
        element.set_defaults();
        element.set_defaults();
        assert_eq!(element.aggregate_function(), first, "column {}", column);
    }
}

#[test]
fn test_default_aggregate_ignores_count_classification() {
    // Default follows the column type, not the Count-driven Numeric classification.
    let harness = TestHarness::new();
    let mut element = harness.element(SalesFixture::ORDER_DATE);
    element.set_pivot_position(PivotPosition::Data);
    element.set_aggregate_function(AggregateFunction::Count);
    assert_eq!(element.classification(), Classification::Numeric);
    assert_eq!(element.default_aggregate(), AggregateFunction::Max);

    element.set_defaults();
    assert_eq!(element.aggregate_function(), AggregateFunction::Max);
    assert_eq!(element.classification(), Classification::DateTime);
}

// ============================================================================
// DISPLAY NAME
// ============================================================================

#[test]
fn test_synthesized_aggregate_name() {
    let harness = TestHarness::new();
    let mut element = harness.data_element(SalesFixture::AMOUNT);
    element.set_aggregate_function(AggregateFunction::Min);
    assert_eq!(element.display_name(), "Min of Amount");
    element.set_aggregate_function(AggregateFunction::Sum);
    assert_eq!(element.display_name(), "Amount");
}

#[test]
fn test_pre_aggregated_column_keeps_name() {
    let harness = TestHarness::new();
    let mut element = harness.data_element(SalesFixture::MARGIN);
    element.set_aggregate_function(AggregateFunction::Average);
    assert_eq!(element.display_name(), "Margin");
    assert_eq!(element.sql_column(), "SUM(orders.margin)");
}

#[test]
fn test_translated_display_name() {
    let harness = TestHarness::new();
    let mut element = harness.data_element(SalesFixture::QUANTITY);
    element.set_aggregate_function(AggregateFunction::Average);
    let translator = DictionaryTranslator::new().with_entry("Average of", "Moyenne de");
    assert_eq!(element.display_name_translated(&translator), "Moyenne de Quantity");
    assert_eq!(element.display_name(), "Average of Quantity");
}

// ============================================================================
// CATALOG CACHE
// ============================================================================

#[test]
fn test_cached_entry_until_invalidated() {
    let mut catalog = SalesFixture::catalog();
    let first = Arc::new(catalog.clone());
    let mut element = ReportElement::for_column(first, SalesFixture::REGION);
    assert_eq!(element.display_name(), "Region");

    catalog.insert(
        ColumnCatalogEntry::new(SalesFixture::REGION, "customers.region", ColumnType::Text)
            .with_display_name("Sales Region"),
    );
    element.set_source(Arc::new(catalog));
    assert_eq!(element.display_name(), "Sales Region");
}

#[test]
fn test_no_sql_source() {
    let harness = TestHarness::no_sql();
    let element = harness.element(SalesFixture::AMOUNT);
    assert!(!element.policy().is_browsable(element_engine::ElementProperty::Sql));
    assert!(!element.policy().is_browsable(element_engine::ElementProperty::ColumnType));
}

// ============================================================================
// SORT KEYS
// ============================================================================

#[test]
fn test_sort_key_ordinals_increase_with_declared_order() {
    let harness = TestHarness::new();
    let element = harness.element(SalesFixture::STATUS);
    let keys: Vec<String> = SalesFixture::status_values()
        .iter()
        .map(|v| element.sort_key(&v.id, false))
        .collect();

    assert_eq!(keys[0], "000000New");
    assert_eq!(keys[3], "000003Closed");
    for pair in keys.windows(2) {
        assert!(pair[0][..6] < pair[1][..6]);
    }
}

#[test]
fn test_sort_key_by_display_value() {
    let harness = TestHarness::new();
    let element = harness.element(SalesFixture::STATUS);
    assert_eq!(element.sort_key("Shipped", true), "000002Shipped");
    assert_eq!(element.sort_key("Shipped", false), "Shipped");
}

#[test]
fn test_sort_key_without_position_ordering() {
    let harness = TestHarness::new();
    let mut element = harness.element(SalesFixture::PRIORITY);
    element.set_sort_order(SortOrder::Descending(1));
    assert_eq!(element.sort_key("H", false), "High");
}

#[test]
fn test_sort_key_unsorted_element() {
    let harness = TestHarness::new();
    let mut element = harness.element(SalesFixture::STATUS);
    element.set_sort_order(SortOrder::NotSorted);
    assert_eq!(element.sort_key("S", false), "Shipped");
}

#[test]
fn test_sort_key_duplicate_uses_last_position() {
    let mut catalog = InMemoryCatalog::new();
    let mut values = SalesFixture::status_values();
    values.push(element_engine::EnumValue::new("N", "New"));
    catalog.insert(
        ColumnCatalogEntry::new("s", "s", ColumnType::Text).with_enum(
            element_engine::EnumDefinition::new("Dup", values).ordered_by_position(),
        ),
    );
    let element = ReportElement::for_column(Arc::new(catalog), "s");
    assert_eq!(element.sort_key("N", false), "000004New");
}

// ============================================================================
// SQL & FLAGS
// ============================================================================

#[test]
fn test_sql_column_aggregates_data_elements() {
    let harness = TestHarness::new();
    let mut element = harness.data_element(SalesFixture::ORDER_DATE);
    assert_eq!(element.sql_column(), "MAX(orders.order_date)");
    element.set_pivot_position(PivotPosition::Column);
    assert_eq!(element.sql_column(), "orders.order_date");
}

#[test]
fn test_html_tags_from_catalog() {
    let harness = TestHarness::new();
    let mut element = harness.element(SalesFixture::NOTES);
    assert!(element.has_html_tags());
    element.set_has_html_tags(Some(false));
    assert!(!element.has_html_tags());
}
