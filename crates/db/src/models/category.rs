//! Category reference data.

use serde::Serialize;
use sqlx::FromRow;
use toycraft_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
