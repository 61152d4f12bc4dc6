//! Error types for presentation building.
//!
//! Every fallible operation in the crate returns [`Result`], whose error type
//! separates caller misuse (saving over an existing file, unknown handles)
//! from failures of external collaborators such as the export renderer.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
