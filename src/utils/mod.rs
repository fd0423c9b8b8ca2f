//! Display helpers

pub mod helper;

pub use helper::{format_compact, format_currency, format_masked, format_percent, truncate_string, MASK};
