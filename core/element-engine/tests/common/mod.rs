//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for element-engine integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use element_engine::{
    ColumnCatalog, ColumnCatalogEntry, ColumnType, EnumDefinition, EnumValue, InMemoryCatalog,
    PivotPosition, ReportElement,
};

/// Test harness holding a sales catalog.
pub struct TestHarness {
    pub catalog: Arc<InMemoryCatalog>,
}

impl TestHarness {
    /// Create a harness over the sales fixture catalog.
    pub fn new() -> Self {
        TestHarness {
            catalog: Arc::new(SalesFixture::catalog()),
        }
    }

    /// Create a harness whose source has no SQL layer.
    pub fn no_sql() -> Self {
        TestHarness {
            catalog: Arc::new(SalesFixture::catalog().no_sql()),
        }
    }

    pub fn source(&self) -> Arc<dyn ColumnCatalog> {
        self.catalog.clone()
    }

    /// A Row element over a fixture column.
    pub fn element(&self, column_id: &str) -> ReportElement {
        ReportElement::for_column(self.source(), column_id)
    }

    /// A Data element over a fixture column, with its default aggregate.
    pub fn data_element(&self, column_id: &str) -> ReportElement {
        let mut element = self.element(column_id);
        element.set_pivot_position(PivotPosition::Data);
        element.set_defaults();
        element
    }
}

/// Column fixtures of a small sales model.
pub struct SalesFixture;

impl SalesFixture {
    pub const AMOUNT: &'static str = "amount";
    pub const QUANTITY: &'static str = "quantity";
    pub const REGION: &'static str = "region";
    pub const ORDER_DATE: &'static str = "order_date";
    pub const STATUS: &'static str = "status";
    pub const PRIORITY: &'static str = "priority";
    pub const MARGIN: &'static str = "margin";
    pub const NOTES: &'static str = "notes";

    pub fn status_values() -> Vec<EnumValue> {
        vec![
            EnumValue::new("N", "New"),
            EnumValue::new("O", "Open"),
            EnumValue::new("S", "Shipped"),
            EnumValue::new("C", "Closed"),
        ]
    }

    pub fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .with_column(
                ColumnCatalogEntry::new(Self::AMOUNT, "orders.amount", ColumnType::Numeric)
                    .with_display_name("Amount")
                    .with_format("N2"),
            )
            .with_column(
                ColumnCatalogEntry::new(Self::QUANTITY, "orders.quantity", ColumnType::Numeric)
                    .with_display_name("Quantity"),
            )
            .with_column(
                ColumnCatalogEntry::new(Self::REGION, "customers.region", ColumnType::Text)
                    .with_display_name("Region"),
            )
            .with_column(
                ColumnCatalogEntry::new(Self::ORDER_DATE, "orders.order_date", ColumnType::DateTime)
                    .with_display_name("Order Date")
                    .with_format("d"),
            )
            .with_column(
                ColumnCatalogEntry::new(Self::STATUS, "orders.status", ColumnType::Text)
                    .with_display_name("Status")
                    .with_enum(
                        EnumDefinition::new("Status", Self::status_values()).ordered_by_position(),
                    ),
            )
            .with_column(
                ColumnCatalogEntry::new(Self::PRIORITY, "orders.priority", ColumnType::Text)
                    .with_display_name("Priority")
                    .with_enum(EnumDefinition::new(
                        "Priority",
                        vec![EnumValue::new("H", "High"), EnumValue::new("L", "Low")],
                    )),
            )
            .with_column(
                ColumnCatalogEntry::new(Self::MARGIN, "SUM(orders.margin)", ColumnType::Numeric)
                    .with_display_name("Margin")
                    .with_format("P1")
                    .aggregated(),
            )
            .with_column(
                ColumnCatalogEntry::new(Self::NOTES, "orders.notes", ColumnType::Text)
                    .with_display_name("Notes")
                    .with_html_tags(true),
            )
    }
}
