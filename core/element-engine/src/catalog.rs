//! FILENAME: core/element-engine/src/catalog.rs
//! PURPOSE: The read-only column catalog elements resolve their defaults from.
//! CONTEXT: The catalog is owned outside this crate. Elements only look entries
//! up by identifier and cache the result; an entry is never mutated through an
//! element.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::definition::ColumnType;
use crate::error::CatalogError;

// ============================================================================
// ENUMERATIONS
// ============================================================================

/// One permitted value of an enumerated column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Stable identifier stored in the data.
    pub id: String,
    /// Value shown to the user.
    pub display_value: String,
}

impl EnumValue {
    pub fn new(id: impl Into<String>, display_value: impl Into<String>) -> Self {
        EnumValue {
            id: id.into(),
            display_value: display_value.into(),
        }
    }
}

/// An ordered list of permitted values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDefinition {
    pub name: String,
    /// Sort by declared position instead of by display value.
    pub use_position: bool,
    pub values: Vec<EnumValue>,
}

impl EnumDefinition {
    pub fn new(name: impl Into<String>, values: Vec<EnumValue>) -> Self {
        EnumDefinition {
            name: name.into(),
            use_position: false,
            values,
        }
    }

    pub fn ordered_by_position(mut self) -> Self {
        self.use_position = true;
        self
    }

    /// First value matching by identifier, or by display value.
    pub fn find(&self, key: &str, by_display_value: bool) -> Option<&EnumValue> {
        self.values.iter().find(|v| {
            if by_display_value {
                v.display_value == key
            } else {
                v.id == key
            }
        })
    }

    /// Last declared position holding `value`.
    pub fn last_position(&self, value: &EnumValue) -> Option<usize> {
        self.values.iter().rposition(|v| v == value)
    }
}

// ============================================================================
// COLUMN ENTRIES
// ============================================================================

/// A physical or logical column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCatalogEntry {
    /// Identifier elements reference the column by.
    pub id: String,
    /// Column expression used in SQL.
    pub name: String,
    pub display_name: String,
    pub column_type: ColumnType,
    /// Native default format; may be empty.
    pub format: String,
    /// The column is already aggregated upstream.
    pub is_aggregate: bool,
    pub has_html_tags: Option<bool>,
    pub enumeration: Option<Arc<EnumDefinition>>,
}

impl ColumnCatalogEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, column_type: ColumnType) -> Self {
        let name = name.into();
        ColumnCatalogEntry {
            id: id.into(),
            display_name: name.clone(),
            name,
            column_type,
            format: String::new(),
            is_aggregate: false,
            has_html_tags: None,
            enumeration: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_enum(mut self, enumeration: EnumDefinition) -> Self {
        self.enumeration = Some(Arc::new(enumeration));
        self
    }

    pub fn with_html_tags(mut self, has_html_tags: bool) -> Self {
        self.has_html_tags = Some(has_html_tags);
        self
    }

    pub fn aggregated(mut self) -> Self {
        self.is_aggregate = true;
        self
    }
}

// ============================================================================
// CATALOG SOURCE
// ============================================================================

/// Lookup interface of the column catalog.
pub trait ColumnCatalog: Send + Sync {
    fn lookup(&self, column_id: &str) -> Result<Arc<ColumnCatalogEntry>, CatalogError>;

    /// The source has no SQL layer (custom SQL and type overrides do not apply).
    fn is_no_sql(&self) -> bool {
        false
    }
}

/// Catalog snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    columns: FxHashMap<String, Arc<ColumnCatalogEntry>>,
    no_sql: bool,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn no_sql(mut self) -> Self {
        self.no_sql = true;
        self
    }

    pub fn with_column(mut self, entry: ColumnCatalogEntry) -> Self {
        self.insert(entry);
        self
    }

    /// Insert or replace an entry. Elements that cached the previous entry keep
    /// it until their cache is invalidated.
    pub fn insert(&mut self, entry: ColumnCatalogEntry) -> Arc<ColumnCatalogEntry> {
        let entry = Arc::new(entry);
        self.columns.insert(entry.id.clone(), Arc::clone(&entry));
        entry
    }

    pub fn remove(&mut self, column_id: &str) -> Option<Arc<ColumnCatalogEntry>> {
        self.columns.remove(column_id)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl ColumnCatalog for InMemoryCatalog {
    fn lookup(&self, column_id: &str) -> Result<Arc<ColumnCatalogEntry>, CatalogError> {
        self.columns
            .get(column_id)
            .cloned()
            .ok_or_else(|| CatalogError::ColumnNotFound(column_id.to_string()))
    }

    fn is_no_sql(&self) -> bool {
        self.no_sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_enum() -> EnumDefinition {
        EnumDefinition::new(
            "Status",
            vec![
                EnumValue::new("O", "Open"),
                EnumValue::new("P", "Pending"),
                EnumValue::new("C", "Closed"),
            ],
        )
    }

    #[test]
    fn test_lookup() {
        let catalog = InMemoryCatalog::new()
            .with_column(ColumnCatalogEntry::new("c1", "orders.amount", ColumnType::Numeric));

        let entry = catalog.lookup("c1").unwrap();
        assert_eq!(entry.display_name, "orders.amount");
        assert_eq!(
            catalog.lookup("missing"),
            Err(CatalogError::ColumnNotFound("missing".to_string()))
        );
        assert!(!catalog.is_no_sql());
    }

    #[test]
    fn test_enum_find() {
        let status = status_enum();
        assert_eq!(status.find("P", false).map(|v| v.display_value.as_str()), Some("Pending"));
        assert_eq!(status.find("Closed", true).map(|v| v.id.as_str()), Some("C"));
        assert!(status.find("Closed", false).is_none());
    }

    #[test]
    fn test_enum_last_position_with_duplicates() {
        let mut status = status_enum();
        status.values.push(EnumValue::new("O", "Open"));
        let open = status.find("O", false).cloned().unwrap();
        assert_eq!(status.last_position(&open), Some(3));
    }
}
