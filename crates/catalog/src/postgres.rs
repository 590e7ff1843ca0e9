//! PostgreSQL implementation of the storage ports, delegating to the
//! `toycraft-db` repositories.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use toycraft_core::pagination::Pagination;
use toycraft_core::types::DbId;
use toycraft_db::models::attachment::Attachment;
use toycraft_db::models::category::Category;
use toycraft_db::models::master::{CreateMaster, Master, MasterFilters, UpdateMaster};
use toycraft_db::models::tag::Tag;
use toycraft_db::models::toy::{CreateToy, Toy, ToyFilters, UpdateToy};
use toycraft_db::repositories::{AttachmentRepo, CategoryRepo, MasterRepo, TagRepo, ToyRepo};

use crate::ports::{CategoryStore, MasterStore, StoreError, Stores, TagStore, ToyStore};

/// One pool-backed adapter serving every storage port.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Stores {
    /// Wire every port to the same PostgreSQL pool.
    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgCatalogStore::new(pool));
        Self {
            toys: store.clone(),
            tags: store.clone(),
            categories: store.clone(),
            masters: store,
        }
    }
}

fn found<T>(row: Option<T>) -> Result<T, StoreError> {
    row.ok_or(StoreError::NotFound)
}

fn affected(matched: bool) -> Result<(), StoreError> {
    if matched {
        Ok(())
    } else {
        Err(StoreError::NotFound)
    }
}

fn to_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

#[async_trait]
impl ToyStore for PgCatalogStore {
    async fn get_toys(
        &self,
        pagination: Option<&Pagination>,
        filters: Option<&ToyFilters>,
    ) -> Result<Vec<Toy>, StoreError> {
        Ok(ToyRepo::list(&self.pool, pagination, filters).await?)
    }

    async fn get_master_toys(
        &self,
        master_id: DbId,
        pagination: Option<&Pagination>,
        filters: Option<&ToyFilters>,
    ) -> Result<Vec<Toy>, StoreError> {
        Ok(ToyRepo::list_by_master(&self.pool, master_id, pagination, filters).await?)
    }

    async fn count_toys(&self, filters: Option<&ToyFilters>) -> Result<u64, StoreError> {
        Ok(to_count(ToyRepo::count(&self.pool, filters).await?))
    }

    async fn count_master_toys(
        &self,
        master_id: DbId,
        filters: Option<&ToyFilters>,
    ) -> Result<u64, StoreError> {
        Ok(to_count(
            ToyRepo::count_by_master(&self.pool, master_id, filters).await?,
        ))
    }

    async fn get_toy_by_id(&self, id: DbId) -> Result<Toy, StoreError> {
        found(ToyRepo::find_by_id(&self.pool, id).await?)
    }

    async fn get_toy_tags(&self, toy_id: DbId) -> Result<Vec<Tag>, StoreError> {
        Ok(TagRepo::list_for_toy(&self.pool, toy_id).await?)
    }

    async fn get_toy_attachments(&self, toy_id: DbId) -> Result<Vec<Attachment>, StoreError> {
        Ok(AttachmentRepo::list_for_toy(&self.pool, toy_id).await?)
    }

    async fn add_toy(&self, input: &CreateToy) -> Result<DbId, StoreError> {
        Ok(ToyRepo::create(&self.pool, input).await?)
    }

    async fn update_toy(&self, diff: &UpdateToy) -> Result<(), StoreError> {
        affected(ToyRepo::update(&self.pool, diff).await?)
    }

    async fn delete_toy(&self, id: DbId) -> Result<(), StoreError> {
        affected(ToyRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl TagStore for PgCatalogStore {
    async fn get_all_tags(&self) -> Result<Vec<Tag>, StoreError> {
        Ok(TagRepo::list_all(&self.pool).await?)
    }

    async fn get_tag_by_id(&self, id: DbId) -> Result<Tag, StoreError> {
        found(TagRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_tags(&self, names: &[String]) -> Result<Vec<DbId>, StoreError> {
        Ok(TagRepo::create_many(&self.pool, names).await?)
    }
}

#[async_trait]
impl CategoryStore for PgCatalogStore {
    async fn get_all_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(CategoryRepo::list_all(&self.pool).await?)
    }

    async fn get_category_by_id(&self, id: DbId) -> Result<Category, StoreError> {
        found(CategoryRepo::find_by_id(&self.pool, id).await?)
    }
}

#[async_trait]
impl MasterStore for PgCatalogStore {
    async fn get_masters(
        &self,
        pagination: Option<&Pagination>,
        filters: Option<&MasterFilters>,
    ) -> Result<Vec<Master>, StoreError> {
        Ok(MasterRepo::list(&self.pool, pagination, filters).await?)
    }

    async fn get_master_by_id(&self, id: DbId) -> Result<Master, StoreError> {
        found(MasterRepo::find_by_id(&self.pool, id).await?)
    }

    async fn get_master_by_user_id(&self, user_id: DbId) -> Result<Master, StoreError> {
        found(MasterRepo::find_by_user_id(&self.pool, user_id).await?)
    }

    async fn register_master(&self, input: &CreateMaster) -> Result<DbId, StoreError> {
        Ok(MasterRepo::create(&self.pool, input).await?)
    }

    async fn update_master(&self, input: &UpdateMaster) -> Result<(), StoreError> {
        // An update without changes still has to name an existing master.
        if input.info.is_none() {
            return self.get_master_by_id(input.id).await.map(|_| ());
        }
        affected(MasterRepo::update(&self.pool, input).await?)
    }
}
