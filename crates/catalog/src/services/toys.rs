use std::sync::Arc;

use toycraft_core::error::{CoreError, Entity, Lookup};
use toycraft_core::pagination::Pagination;
use toycraft_core::types::DbId;
use toycraft_db::models::toy::{CreateToy, ToyFilters, ToyWithRelations, UpdateToy};

use super::lookup_error;
use crate::assembly;
use crate::ports::ToyStore;

/// Toy reads return fully assembled aggregates; writes go through the
/// store's transactional operations.
pub struct ToyService {
    store: Arc<dyn ToyStore>,
}

impl ToyService {
    pub fn new(store: Arc<dyn ToyStore>) -> Self {
        Self { store }
    }

    pub async fn get_toys(
        &self,
        pagination: Option<&Pagination>,
        filters: Option<&ToyFilters>,
    ) -> Result<Vec<ToyWithRelations>, CoreError> {
        let rows = self.store.get_toys(pagination, filters).await?;
        Ok(assembly::assemble_all(self.store.as_ref(), rows).await?)
    }

    pub async fn get_master_toys(
        &self,
        master_id: DbId,
        pagination: Option<&Pagination>,
        filters: Option<&ToyFilters>,
    ) -> Result<Vec<ToyWithRelations>, CoreError> {
        let rows = self
            .store
            .get_master_toys(master_id, pagination, filters)
            .await?;
        Ok(assembly::assemble_all(self.store.as_ref(), rows).await?)
    }

    pub async fn count_toys(&self, filters: Option<&ToyFilters>) -> Result<u64, CoreError> {
        Ok(self.store.count_toys(filters).await?)
    }

    pub async fn count_master_toys(
        &self,
        master_id: DbId,
        filters: Option<&ToyFilters>,
    ) -> Result<u64, CoreError> {
        Ok(self.store.count_master_toys(master_id, filters).await?)
    }

    pub async fn get_toy_by_id(&self, id: DbId) -> Result<ToyWithRelations, CoreError> {
        let row = self
            .store
            .get_toy_by_id(id)
            .await
            .map_err(lookup_error(Entity::Toy, Lookup::Id(id)))?;
        Ok(assembly::assemble(self.store.as_ref(), row).await?)
    }

    /// Insert a toy unless the master already owns one with the same name in
    /// the same category. Names are compared exactly.
    pub async fn add_toy(&self, input: &CreateToy) -> Result<DbId, CoreError> {
        let owned = self
            .store
            .get_master_toys(input.master_id, None, None)
            .await?;
        if owned
            .iter()
            .any(|t| t.name == input.name && t.category_id == input.category_id)
        {
            return Err(CoreError::already_exists(
                Entity::Toy,
                format!(
                    "master {} already has a toy named '{}' in category {}",
                    input.master_id, input.name, input.category_id
                ),
            ));
        }

        let id = self.store.add_toy(input).await?;
        tracing::info!(toy_id = id, master_id = input.master_id, "Toy created");
        Ok(id)
    }

    pub async fn update_toy(&self, diff: &UpdateToy) -> Result<(), CoreError> {
        if diff.is_noop() {
            return Ok(());
        }
        self.store
            .update_toy(diff)
            .await
            .map_err(lookup_error(Entity::Toy, Lookup::Id(diff.id)))?;
        tracing::info!(toy_id = diff.id, "Toy updated");
        Ok(())
    }

    pub async fn delete_toy(&self, id: DbId) -> Result<(), CoreError> {
        self.store
            .delete_toy(id)
            .await
            .map_err(lookup_error(Entity::Toy, Lookup::Id(id)))?;
        tracing::info!(toy_id = id, "Toy deleted");
        Ok(())
    }
}
