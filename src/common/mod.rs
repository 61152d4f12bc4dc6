//! Common types and utilities shared across the crate.
//!
//! Errors, measurement units, colors and XML helpers live here so the style,
//! position and document modules can share them without depending on each other.

// Submodule declarations
pub mod error;
pub mod style;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use style::{Length, RGBColor};
