//! FILENAME: core/element-engine/src/error.rs

use thiserror::Error;

use crate::editor::ElementProperty;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Element has no column reference")]
    NoColumnReference,

    #[error("No catalog source attached to element")]
    NoSource,

    #[error("Column not found in catalog: {0}")]
    ColumnNotFound(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElementError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid sort order: {0}")]
    InvalidSortOrder(String),

    #[error("Property is read-only: {0:?}")]
    ReadOnlyProperty(ElementProperty),

    #[error("Unknown property: {0}")]
    UnknownProperty(String),
}
