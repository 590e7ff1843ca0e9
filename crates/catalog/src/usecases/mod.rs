//! Use-case orchestration.
//!
//! Every mutating operation resolves its dependencies in a fixed order,
//! validates, and only then calls a mutating service method. The first
//! missing dependency is the error reported.

pub mod categories;
pub mod masters;
pub mod tags;
pub mod toys;

use std::sync::Arc;

use toycraft_core::error::CoreError;
use toycraft_core::types::DbId;
use toycraft_core::validation::ContentFilter;

use crate::ports::{IdentityResolver, Stores};
use crate::services::{CategoryService, MasterService, TagService, ToyService};

pub use masters::{RegisterMasterInput, UpdateMasterInput};
pub use toys::{AddToyInput, UpdateToyInput};

/// Entry point for every catalog operation.
pub struct CatalogUseCases {
    identity: Arc<dyn IdentityResolver>,
    toys: ToyService,
    tags: TagService,
    categories: CategoryService,
    masters: MasterService,
    content: ContentFilter,
}

impl CatalogUseCases {
    pub fn new(stores: Stores, identity: Arc<dyn IdentityResolver>, content: ContentFilter) -> Self {
        Self {
            identity,
            toys: ToyService::new(stores.toys),
            tags: TagService::new(stores.tags),
            categories: CategoryService::new(stores.categories),
            masters: MasterService::new(stores.masters),
            content,
        }
    }

    /// Resolve an access token to its user id without touching the catalog.
    pub async fn authenticate(&self, access_token: &str) -> Result<DbId, CoreError> {
        self.resolve_user(access_token).await
    }

    async fn resolve_user(&self, access_token: &str) -> Result<DbId, CoreError> {
        let user_id = self.identity.resolve(access_token).await?;
        tracing::debug!(user_id, "Access token resolved");
        Ok(user_id)
    }

    /// Confirm every tag exists, failing on the first missing one in order.
    async fn ensure_tags_exist(&self, tag_ids: &[DbId]) -> Result<(), CoreError> {
        for &tag_id in tag_ids {
            self.tags.get_tag_by_id(tag_id).await?;
        }
        Ok(())
    }
}
