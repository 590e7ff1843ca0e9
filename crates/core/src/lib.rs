//! Database-free domain logic for the toy catalog.
//!
//! Holds the shared id/timestamp types, the closed domain error enum, the
//! tag/attachment diff engine, tag-name deduplication and field validation.

pub mod diff;
pub mod error;
pub mod pagination;
pub mod tags;
pub mod types;
pub mod validation;
