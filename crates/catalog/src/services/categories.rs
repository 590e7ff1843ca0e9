use std::sync::Arc;

use toycraft_core::error::{CoreError, Entity, Lookup};
use toycraft_core::types::DbId;
use toycraft_db::models::category::Category;

use super::lookup_error;
use crate::ports::CategoryStore;

/// Read-only access to reference categories.
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }

    pub async fn get_all_categories(&self) -> Result<Vec<Category>, CoreError> {
        Ok(self.store.get_all_categories().await?)
    }

    pub async fn get_category_by_id(&self, id: DbId) -> Result<Category, CoreError> {
        self.store
            .get_category_by_id(id)
            .await
            .map_err(lookup_error(Entity::Category, Lookup::Id(id)))
    }
}
