//! Request handlers, one module per resource.
//!
//! Handlers are thin: extract, call one [`CatalogUseCases`](toycraft_catalog::CatalogUseCases)
//! operation, wrap the result in [`DataResponse`](crate::response::DataResponse).

pub mod categories;
pub mod masters;
pub mod tags;
pub mod toys;
