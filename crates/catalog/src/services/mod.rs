//! Domain services, one per entity family.
//!
//! Services translate [`StoreError`] into [`CoreError`], attaching the entity
//! and lookup key to `NotFound`. They do not validate input.

pub mod categories;
pub mod masters;
pub mod tags;
pub mod toys;

pub use categories::CategoryService;
pub use masters::MasterService;
pub use tags::TagService;
pub use toys::ToyService;

use toycraft_core::error::{CoreError, Entity, Lookup};

use crate::ports::StoreError;

/// Map a failed lookup, keeping other storage failures internal.
pub(crate) fn lookup_error(entity: Entity, lookup: Lookup) -> impl FnOnce(StoreError) -> CoreError {
    move |err| match err {
        StoreError::NotFound => CoreError::NotFound { entity, lookup },
        other => other.into(),
    }
}
