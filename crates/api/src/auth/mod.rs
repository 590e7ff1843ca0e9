//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation, and the
//!   [`IdentityResolver`](toycraft_catalog::IdentityResolver) built on them.

pub mod jwt;
