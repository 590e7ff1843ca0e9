//! Repository for the `tags` table and tag reads through
//! `toys_tags_associations`.

use std::collections::HashMap;

use sqlx::PgPool;
use toycraft_core::types::DbId;

use crate::models::tag::Tag;

/// Column list for `tags` queries.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides create and read operations for tags. Tags are never updated or deleted.
pub struct TagRepo;

impl TagRepo {
    /// List every tag ordered by id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags ORDER BY id");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// Find a tag by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert one tag per name in a single statement and return the new IDs
    /// in input order.
    ///
    /// An empty input is a no-op. Names are stored exactly as given and must
    /// be distinct; callers are responsible for deduplication.
    pub async fn create_many(pool: &PgPool, names: &[String]) -> Result<Vec<DbId>, sqlx::Error> {
        if names.is_empty() {
            return Ok(vec![]);
        }

        // RETURNING order is unspecified, so rows are matched back by name.
        let rows = sqlx::query_as::<_, (DbId, String)>(
            "INSERT INTO tags (name) \
             SELECT n.name FROM UNNEST($1::TEXT[]) AS n(name) \
             RETURNING id, name",
        )
        .bind(names)
        .fetch_all(pool)
        .await?;

        let ids: HashMap<&str, DbId> = rows.iter().map(|(id, name)| (name.as_str(), *id)).collect();
        names
            .iter()
            .map(|name| ids.get(name.as_str()).copied().ok_or(sqlx::Error::RowNotFound))
            .collect()
    }

    /// List the tags associated with a toy.
    pub async fn list_for_toy(pool: &PgPool, toy_id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name, t.created_at, t.updated_at \
             FROM toys_tags_associations tta \
             JOIN tags t ON t.id = tta.tag_id \
             WHERE tta.toy_id = $1 \
             ORDER BY t.id",
        )
        .bind(toy_id)
        .fetch_all(pool)
        .await
    }
}
