use serde::Deserialize;
use toycraft_core::diff::{attachment_diff, dedup_links, set_diff};
use toycraft_core::error::CoreError;
use toycraft_core::pagination::Pagination;
use toycraft_core::types::DbId;
use toycraft_core::validation::fields::{
    validate_attachment_links, validate_length, validate_price, validate_quantity,
    MAX_TOY_DESCRIPTION_LEN, MAX_TOY_NAME_LEN,
};
use toycraft_core::validation::ContentFilter;
use toycraft_db::models::toy::{CreateToy, ToyFilters, ToyWithRelations, UpdateToy};

use super::CatalogUseCases;

/// Request to add a toy for the caller's master.
#[derive(Debug, Clone, Deserialize)]
pub struct AddToyInput {
    pub category_id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// Partial update of a toy.
///
/// Absent scalar fields keep their value. `tag_ids` and `attachments` carry
/// the desired final collections: `None` leaves a collection untouched and
/// an empty list clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateToyInput {
    #[serde(skip)]
    pub id: DbId,
    pub category_id: Option<DbId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub tag_ids: Option<Vec<DbId>>,
    pub attachments: Option<Vec<String>>,
}

fn validate_name(content: &ContentFilter, name: &str) -> Result<(), CoreError> {
    validate_length("name", name, 1, MAX_TOY_NAME_LEN)?;
    content.check("name", name)
}

fn validate_description(content: &ContentFilter, description: &str) -> Result<(), CoreError> {
    validate_length("description", description, 0, MAX_TOY_DESCRIPTION_LEN)?;
    content.check("description", description)
}

fn trimmed(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.trim().to_string()).collect()
}

impl AddToyInput {
    fn validate(&self, content: &ContentFilter) -> Result<(), CoreError> {
        validate_name(content, &self.name)?;
        validate_description(content, &self.description)?;
        validate_price(self.price)?;
        validate_quantity(self.quantity)?;
        validate_attachment_links(&self.attachments)
    }
}

impl UpdateToyInput {
    fn validate(&self, content: &ContentFilter) -> Result<(), CoreError> {
        if let Some(name) = &self.name {
            validate_name(content, name)?;
        }
        if let Some(description) = &self.description {
            validate_description(content, description)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(links) = &self.attachments {
            validate_attachment_links(links)?;
        }
        Ok(())
    }
}

impl CatalogUseCases {
    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add a toy owned by the caller's master.
    ///
    /// Order: identity, master, category, tags in input order, validation,
    /// then the duplicate check and insert. Repeated attachment links are
    /// stored once.
    pub async fn add_toy(&self, access_token: &str, input: AddToyInput) -> Result<DbId, CoreError> {
        let user_id = self.resolve_user(access_token).await?;
        let master = self.masters.get_master_by_user(user_id).await?;
        self.categories.get_category_by_id(input.category_id).await?;
        self.ensure_tags_exist(&input.tag_ids).await?;
        input.validate(&self.content)?;

        let create = CreateToy {
            master_id: master.id,
            category_id: input.category_id,
            name: input.name.trim().to_string(),
            description: input.description.trim().to_string(),
            price: input.price,
            quantity: input.quantity,
            tag_ids: input.tag_ids,
            attachments: dedup_links(&trimmed(&input.attachments)),
        };
        self.toys.add_toy(&create).await
    }

    /// Move a toy to the desired state in one atomic diff.
    pub async fn update_toy(&self, input: UpdateToyInput) -> Result<(), CoreError> {
        let current = self.toys.get_toy_by_id(input.id).await?;
        if let Some(category_id) = input.category_id {
            self.categories.get_category_by_id(category_id).await?;
        }
        if let Some(desired) = &input.tag_ids {
            self.ensure_tags_exist(desired).await?;
        }

        let tags = match &input.tag_ids {
            Some(desired) => set_diff(&current.tag_ids(), desired),
            None => Default::default(),
        };
        let attachments = match &input.attachments {
            Some(desired) => attachment_diff(
                current.attachments.iter().map(|a| (a.id, a.link.as_str())),
                &trimmed(desired),
            ),
            None => Default::default(),
        };

        input.validate(&self.content)?;

        let diff = UpdateToy {
            id: input.id,
            category_id: input.category_id,
            name: input.name.map(|n| n.trim().to_string()),
            description: input.description.map(|d| d.trim().to_string()),
            price: input.price,
            quantity: input.quantity,
            tag_ids_to_add: tags.to_add,
            tag_ids_to_delete: tags.to_delete,
            attachments_to_add: attachments.links_to_add,
            attachment_ids_to_delete: attachments.ids_to_delete,
        };
        tracing::debug!(
            toy_id = diff.id,
            noop = diff.is_noop(),
            "Toy diff computed",
        );
        self.toys.update_toy(&diff).await
    }

    pub async fn delete_toy(&self, toy_id: DbId) -> Result<(), CoreError> {
        self.toys.get_toy_by_id(toy_id).await?;
        self.toys.delete_toy(toy_id).await
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn get_toy(&self, toy_id: DbId) -> Result<ToyWithRelations, CoreError> {
        self.toys.get_toy_by_id(toy_id).await
    }

    pub async fn get_toys(
        &self,
        pagination: Option<&Pagination>,
        filters: Option<&ToyFilters>,
    ) -> Result<Vec<ToyWithRelations>, CoreError> {
        self.toys.get_toys(pagination, filters).await
    }

    pub async fn count_toys(&self, filters: Option<&ToyFilters>) -> Result<u64, CoreError> {
        self.toys.count_toys(filters).await
    }

    pub async fn get_master_toys(
        &self,
        master_id: DbId,
        pagination: Option<&Pagination>,
        filters: Option<&ToyFilters>,
    ) -> Result<Vec<ToyWithRelations>, CoreError> {
        self.toys.get_master_toys(master_id, pagination, filters).await
    }

    pub async fn count_master_toys(
        &self,
        master_id: DbId,
        filters: Option<&ToyFilters>,
    ) -> Result<u64, CoreError> {
        self.toys.count_master_toys(master_id, filters).await
    }

    /// Toys of the master owned by `user_id`.
    pub async fn get_user_toys(
        &self,
        user_id: DbId,
        pagination: Option<&Pagination>,
        filters: Option<&ToyFilters>,
    ) -> Result<Vec<ToyWithRelations>, CoreError> {
        let master = self.masters.get_master_by_user(user_id).await?;
        self.toys.get_master_toys(master.id, pagination, filters).await
    }
}
