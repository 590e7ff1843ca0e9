//! Master (craftsperson) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use toycraft_core::pagination::SortOrder;
use toycraft_core::types::{DbId, Timestamp};

use crate::models::toy::ToyWithRelations;

/// A row from the `masters` table. At most one per `user_id`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Master {
    pub id: DbId,
    pub user_id: DbId,
    pub info: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A master together with the toys it owns. `toys` is derived on read.
#[derive(Debug, Clone, Serialize)]
pub struct MasterWithToys {
    #[serde(flatten)]
    pub master: Master,
    pub toys: Vec<ToyWithRelations>,
}

/// DTO for registering a master.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaster {
    pub user_id: DbId,
    pub info: Option<String>,
}

/// Partial update of a master.
///
/// `info: None` leaves the column untouched, `Some(None)` clears it and
/// `Some(Some(text))` replaces it.
#[derive(Debug, Clone, Default)]
pub struct UpdateMaster {
    pub id: DbId,
    pub info: Option<Option<String>>,
}

/// Optional filters for master listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MasterFilters {
    /// Case-insensitive substring match on `info`.
    pub search: Option<String>,
    /// Order by creation time; `None` orders by id.
    pub created_at_order: Option<SortOrder>,
}
