//! Event handlers for dashboard events

pub mod composite;
pub mod console;

// Re-export for convenience
pub use composite::CompositeEventHandler;
pub use console::ConsoleEventHandler;
