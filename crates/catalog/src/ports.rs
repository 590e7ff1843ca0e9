//! Capability traits the catalog depends on.
//!
//! Services hold these as `Arc<dyn Trait>` so that the PostgreSQL adapter in
//! [`crate::postgres`] and in-memory fixtures in tests are interchangeable.

use std::sync::Arc;

use async_trait::async_trait;
use toycraft_core::error::CoreError;
use toycraft_core::pagination::Pagination;
use toycraft_core::types::DbId;
use toycraft_db::models::attachment::Attachment;
use toycraft_db::models::category::Category;
use toycraft_db::models::master::{CreateMaster, Master, MasterFilters, UpdateMaster};
use toycraft_db::models::tag::Tag;
use toycraft_db::models::toy::{CreateToy, Toy, ToyFilters, UpdateToy};

/// Failure reported by a storage port.
///
/// `NotFound` is kept apart from other failures so that services can turn it
/// into the matching entity-specific domain error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Database(other),
        }
    }
}

/// Storage failures that reach a caller without lookup context are internal.
impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Internal(err.to_string())
    }
}

/// Toy rows and their child collections.
#[async_trait]
pub trait ToyStore: Send + Sync {
    async fn get_toys(
        &self,
        pagination: Option<&Pagination>,
        filters: Option<&ToyFilters>,
    ) -> Result<Vec<Toy>, StoreError>;

    async fn get_master_toys(
        &self,
        master_id: DbId,
        pagination: Option<&Pagination>,
        filters: Option<&ToyFilters>,
    ) -> Result<Vec<Toy>, StoreError>;

    async fn count_toys(&self, filters: Option<&ToyFilters>) -> Result<u64, StoreError>;

    async fn count_master_toys(
        &self,
        master_id: DbId,
        filters: Option<&ToyFilters>,
    ) -> Result<u64, StoreError>;

    async fn get_toy_by_id(&self, id: DbId) -> Result<Toy, StoreError>;

    async fn get_toy_tags(&self, toy_id: DbId) -> Result<Vec<Tag>, StoreError>;

    async fn get_toy_attachments(&self, toy_id: DbId) -> Result<Vec<Attachment>, StoreError>;

    /// Insert the toy row, its associations and attachments atomically.
    async fn add_toy(&self, input: &CreateToy) -> Result<DbId, StoreError>;

    /// Apply a diff atomically. An empty diff must not touch storage.
    /// `NotFound` when the toy is gone by the time the diff is applied.
    async fn update_toy(&self, diff: &UpdateToy) -> Result<(), StoreError>;

    /// Delete a toy and everything it owns. `NotFound` when no row matched.
    async fn delete_toy(&self, id: DbId) -> Result<(), StoreError>;
}

#[async_trait]
pub trait TagStore: Send + Sync {
    async fn get_all_tags(&self) -> Result<Vec<Tag>, StoreError>;

    async fn get_tag_by_id(&self, id: DbId) -> Result<Tag, StoreError>;

    /// Insert one tag per name, returning ids in input order.
    async fn create_tags(&self, names: &[String]) -> Result<Vec<DbId>, StoreError>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn get_all_categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn get_category_by_id(&self, id: DbId) -> Result<Category, StoreError>;
}

#[async_trait]
pub trait MasterStore: Send + Sync {
    async fn get_masters(
        &self,
        pagination: Option<&Pagination>,
        filters: Option<&MasterFilters>,
    ) -> Result<Vec<Master>, StoreError>;

    async fn get_master_by_id(&self, id: DbId) -> Result<Master, StoreError>;

    async fn get_master_by_user_id(&self, user_id: DbId) -> Result<Master, StoreError>;

    async fn register_master(&self, input: &CreateMaster) -> Result<DbId, StoreError>;

    /// Apply a partial update. `NotFound` when no row matched.
    async fn update_master(&self, input: &UpdateMaster) -> Result<(), StoreError>;
}

/// Turns an opaque access token into the caller's user id.
///
/// Implementations fail with [`CoreError::Unauthenticated`] for any token they
/// cannot verify.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, access_token: &str) -> Result<DbId, CoreError>;
}

/// The storage ports a [`crate::CatalogUseCases`] is built from.
#[derive(Clone)]
pub struct Stores {
    pub toys: Arc<dyn ToyStore>,
    pub tags: Arc<dyn TagStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub masters: Arc<dyn MasterStore>,
}
