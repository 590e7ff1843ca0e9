//! Tag model.

use serde::Serialize;
use sqlx::FromRow;
use toycraft_core::types::{DbId, Timestamp};

/// A row from the `tags` table. `name` keeps the casing it was created with.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
