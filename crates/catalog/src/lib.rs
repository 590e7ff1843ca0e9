//! Toy catalog orchestration.
//!
//! Layers, leaf-first:
//! - [`ports`]: capability traits over storage and identity resolution
//! - [`postgres`]: the PostgreSQL implementation of the storage ports
//! - [`assembly`]: decoration of toy rows with tags and attachments
//! - [`services`]: one domain service per entity family
//! - [`usecases`]: cross-service operations with existence gating and diffs

pub mod assembly;
pub mod ports;
pub mod postgres;
pub mod services;
pub mod usecases;

pub use ports::{
    CategoryStore, IdentityResolver, MasterStore, StoreError, Stores, TagStore, ToyStore,
};
pub use usecases::CatalogUseCases;
