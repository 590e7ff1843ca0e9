//! Field validation applied before any mutating storage call.
//!
//! Pure logic only: numeric bounds, text lengths and banned-word filtering.

pub mod content;
pub mod fields;

pub use content::ContentFilter;
