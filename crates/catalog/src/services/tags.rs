use std::sync::Arc;

use toycraft_core::error::{CoreError, Entity, Lookup};
use toycraft_core::types::DbId;
use toycraft_db::models::tag::Tag;

use super::lookup_error;
use crate::ports::TagStore;

pub struct TagService {
    store: Arc<dyn TagStore>,
}

impl TagService {
    pub fn new(store: Arc<dyn TagStore>) -> Self {
        Self { store }
    }

    pub async fn get_all_tags(&self) -> Result<Vec<Tag>, CoreError> {
        Ok(self.store.get_all_tags().await?)
    }

    pub async fn get_tag_by_id(&self, id: DbId) -> Result<Tag, CoreError> {
        self.store
            .get_tag_by_id(id)
            .await
            .map_err(lookup_error(Entity::Tag, Lookup::Id(id)))
    }

    /// Insert already-deduplicated names. An empty list never reaches storage.
    pub async fn create_tags(&self, names: &[String]) -> Result<Vec<DbId>, CoreError> {
        if names.is_empty() {
            return Ok(vec![]);
        }
        let ids = self.store.create_tags(names).await?;
        tracing::info!(count = ids.len(), "Tags created");
        Ok(ids)
    }
}
