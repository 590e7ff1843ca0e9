use std::sync::Arc;

use toycraft_core::error::{CoreError, Entity, Lookup};
use toycraft_core::pagination::Pagination;
use toycraft_core::types::DbId;
use toycraft_db::models::master::{CreateMaster, Master, MasterFilters, UpdateMaster};

use super::lookup_error;
use crate::ports::{MasterStore, StoreError};

pub struct MasterService {
    store: Arc<dyn MasterStore>,
}

impl MasterService {
    pub fn new(store: Arc<dyn MasterStore>) -> Self {
        Self { store }
    }

    pub async fn get_masters(
        &self,
        pagination: Option<&Pagination>,
        filters: Option<&MasterFilters>,
    ) -> Result<Vec<Master>, CoreError> {
        Ok(self.store.get_masters(pagination, filters).await?)
    }

    pub async fn get_master_by_id(&self, id: DbId) -> Result<Master, CoreError> {
        self.store
            .get_master_by_id(id)
            .await
            .map_err(lookup_error(Entity::Master, Lookup::Id(id)))
    }

    pub async fn get_master_by_user(&self, user_id: DbId) -> Result<Master, CoreError> {
        self.store
            .get_master_by_user_id(user_id)
            .await
            .map_err(lookup_error(Entity::Master, Lookup::UserId(user_id)))
    }

    /// Register a master for a user that has none yet.
    ///
    /// The lookup runs before the insert; the unique index on `user_id`
    /// catches the race between two concurrent registrations.
    pub async fn register_master(&self, input: &CreateMaster) -> Result<DbId, CoreError> {
        match self.store.get_master_by_user_id(input.user_id).await {
            Ok(existing) => {
                return Err(CoreError::already_exists(
                    Entity::Master,
                    format!("user {} already has master {}", input.user_id, existing.id),
                ));
            }
            Err(StoreError::NotFound) => {}
            Err(err) => return Err(err.into()),
        }

        let id = self.store.register_master(input).await?;
        tracing::info!(master_id = id, user_id = input.user_id, "Master registered");
        Ok(id)
    }

    pub async fn update_master(&self, input: &UpdateMaster) -> Result<(), CoreError> {
        self.store
            .update_master(input)
            .await
            .map_err(lookup_error(Entity::Master, Lookup::Id(input.id)))
    }
}
