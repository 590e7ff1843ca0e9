//! Request extractors shared by handlers.
//!
//! - [`auth::BearerToken`] -- The raw access token from the `Authorization` header.

pub mod auth;
