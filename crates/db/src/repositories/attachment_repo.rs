//! Repository for reads of the `toys_attachments` table.
//!
//! Attachment writes belong to the toy aggregate and live in `ToyRepo`.

use sqlx::PgPool;
use toycraft_core::types::DbId;

use crate::models::attachment::Attachment;

/// Column list for `toys_attachments` queries.
const COLUMNS: &str = "id, toy_id, link, created_at, updated_at";

/// Provides read operations for toy attachments.
pub struct AttachmentRepo;

impl AttachmentRepo {
    /// List a toy's attachments in insertion order.
    pub async fn list_for_toy(pool: &PgPool, toy_id: DbId) -> Result<Vec<Attachment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM toys_attachments WHERE toy_id = $1 ORDER BY id");
        sqlx::query_as::<_, Attachment>(&query)
            .bind(toy_id)
            .fetch_all(pool)
            .await
    }
}
