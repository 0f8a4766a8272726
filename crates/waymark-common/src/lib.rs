//! # Waymark Common
//!
//! Shared types, errors, and constants used across Waymark components.
//!
//! ## Modules
//! - `types` - Core data structures (LocationRecord, UnlockOutcome, etc.)
//! - `error` - Common error taxonomy
//! - `constants` - Defaults, route paths, and archive naming

pub mod constants;
pub mod error;
pub mod types;

pub use error::WaymarkError;
pub use types::*;
