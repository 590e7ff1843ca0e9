//! Toy model, aggregate view and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use toycraft_core::pagination::SortOrder;
use toycraft_core::types::{DbId, Timestamp};

use crate::models::attachment::Attachment;
use crate::models::tag::Tag;

/// A row from the `toys` table, without its child collections.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Toy {
    pub id: DbId,
    pub master_id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The toy aggregate: the row plus its tag set and attachments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToyWithRelations {
    #[serde(flatten)]
    pub toy: Toy,
    pub tags: Vec<Tag>,
    pub attachments: Vec<Attachment>,
}

impl ToyWithRelations {
    pub fn tag_ids(&self) -> Vec<DbId> {
        self.tags.iter().map(|t| t.id).collect()
    }
}

/// DTO for inserting a toy together with its initial tags and attachments.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateToy {
    pub master_id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// Diff applied to an existing toy in one transaction.
///
/// Scalar fields set to `None` keep their stored value. The four collection
/// sets are applied delete-before-insert per collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateToy {
    pub id: DbId,
    pub category_id: Option<DbId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub tag_ids_to_add: Vec<DbId>,
    pub tag_ids_to_delete: Vec<DbId>,
    pub attachments_to_add: Vec<String>,
    pub attachment_ids_to_delete: Vec<DbId>,
}

impl UpdateToy {
    /// Whether any column of the `toys` row changes.
    pub fn has_scalar_changes(&self) -> bool {
        self.category_id.is_some()
            || self.name.is_some()
            || self.description.is_some()
            || self.price.is_some()
            || self.quantity.is_some()
    }

    /// Whether applying the diff would issue no statement at all.
    pub fn is_noop(&self) -> bool {
        !self.has_scalar_changes()
            && self.tag_ids_to_add.is_empty()
            && self.tag_ids_to_delete.is_empty()
            && self.attachments_to_add.is_empty()
            && self.attachment_ids_to_delete.is_empty()
    }
}

/// Optional filters for toy listing and counting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToyFilters {
    /// Case-insensitive substring match on name or description.
    pub search: Option<String>,
    pub price_floor: Option<f64>,
    pub price_ceil: Option<f64>,
    pub quantity_floor: Option<i32>,
    /// Toy's category must be one of these.
    #[serde(default)]
    pub category_ids: Vec<DbId>,
    /// Toy must carry at least one of these tags.
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
    /// Order by creation time; `None` orders by id.
    pub created_at_order: Option<SortOrder>,
}
