use toycraft_core::error::CoreError;
use toycraft_core::tags::plan_tag_creation;
use toycraft_core::types::DbId;
use toycraft_core::validation::fields::{validate_length, MAX_TAG_NAME_LEN};
use toycraft_db::models::tag::Tag;

use super::CatalogUseCases;

impl CatalogUseCases {
    pub async fn get_tags(&self) -> Result<Vec<Tag>, CoreError> {
        self.tags.get_all_tags().await
    }

    pub async fn get_tag(&self, id: DbId) -> Result<Tag, CoreError> {
        self.tags.get_tag_by_id(id).await
    }

    /// Create tags by name, reusing existing tags that match case-insensitively.
    ///
    /// Returns one id per distinct normalized name: ids of matched existing
    /// tags first, then ids of the inserted ones. Only new names are validated.
    pub async fn create_tags(&self, names: &[String]) -> Result<Vec<DbId>, CoreError> {
        if names.is_empty() {
            return Ok(vec![]);
        }

        let existing = self.tags.get_all_tags().await?;
        let plan = plan_tag_creation(existing.iter().map(|t| (t.id, t.name.as_str())), names);

        for name in &plan.names_to_create {
            validate_length("tag name", name, 1, MAX_TAG_NAME_LEN)?;
            self.content.check("tag name", name)?;
        }

        tracing::debug!(
            requested = names.len(),
            reused = plan.existing_ids.len(),
            created = plan.names_to_create.len(),
            "Tag creation planned",
        );

        let mut ids = plan.existing_ids;
        ids.extend(self.tags.create_tags(&plan.names_to_create).await?);
        Ok(ids)
    }
}
