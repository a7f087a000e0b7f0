//! FILENAME: core/format-engine/src/logging.rs
// PURPOSE: Category-tagged logging macros shared by the format and element crates.
// CONTEXT: Library code only talks to the `log` facade. The category becomes the
// log target so a host can filter e.g. `ELEMENT` or `FORMAT` independently.

// ============================================================================
// CATEGORIES
// ============================================================================

pub const FORMAT: &str = "FORMAT";
pub const LOCALE: &str = "LOCALE";
pub const ELEMENT: &str = "ELEMENT";
pub const CATALOG: &str = "CATALOG";
pub const EXPORT: &str = "EXPORT";

// ============================================================================
// MACROS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::debug!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::info!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::warn!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::error!(target: $cat, $($arg)*)
    };
}

// Re-export the macros so they can be imported via `use format_engine::logging::log_warn;`
pub use log_debug;
pub use log_error;
pub use log_info;
pub use log_warn;
