//! Session state, its reducer and the shared store

pub mod reducer;
pub mod state;
pub mod store;

// Re-export for convenience
pub use reducer::{reduce, Action, SendOutcome, Transition};
pub use state::{AppState, Tab, UiState};
pub use store::SessionStore;
