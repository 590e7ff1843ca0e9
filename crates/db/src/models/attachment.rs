//! Toy attachment model.

use serde::Serialize;
use sqlx::FromRow;
use toycraft_core::types::{DbId, Timestamp};

/// A row from the `toys_attachments` table, owned by exactly one toy.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Attachment {
    pub id: DbId,
    pub toy_id: DbId,
    pub link: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
