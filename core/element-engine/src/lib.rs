//! FILENAME: core/element-engine/src/lib.rs
//! Report element subsystem.
//!
//! A report element is one catalog column placed in a report. This crate
//! resolves its effective classification, display name, aggregate and format
//! from the element's overrides and the column catalog, and derives which
//! properties an editor shows.
//!
//! Layers:
//! - `definition`: Closed enumerations an element is configured with
//! - `catalog`: Read-only column definitions elements resolve against
//! - `element`: The element and its resolution queries
//! - `editor`: Property visibility and read-only policy

pub mod catalog;
pub mod definition;
pub mod editor;
pub mod element;
pub mod error;
pub mod style;
pub mod translation;

pub use catalog::{ColumnCatalog, ColumnCatalogEntry, EnumDefinition, EnumValue, InMemoryCatalog};
pub use definition::*;
pub use editor::{EditorPolicy, ElementProperty, PolicyInputs, PropertyState};
pub use element::{ReportElement, FALLBACK_FORMAT};
pub use error::{CatalogError, ElementError};
pub use style::CellCss;
pub use translation::{DictionaryTranslator, IdentityTranslator, Translator};

pub use format_engine::{Classification, Locale, RawValue, TranslatedFormats};
