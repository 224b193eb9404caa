//! Persisted user state.

pub mod preferences;

pub use preferences::{Language, Preferences, PREFERENCES_FILE};
