//! Repository for the `masters` table.

use sqlx::{PgPool, Postgres, QueryBuilder};
use toycraft_core::pagination::Pagination;
use toycraft_core::types::DbId;

use crate::models::master::{CreateMaster, Master, MasterFilters, UpdateMaster};
use crate::repositories::toy_repo::escape_like;

/// Column list for `masters` queries.
const COLUMNS: &str = "id, user_id, info, created_at, updated_at";

/// Provides CRUD operations for masters.
pub struct MasterRepo;

impl MasterRepo {
    /// Insert a master and return its ID.
    ///
    /// The one-master-per-user rule is checked by the caller before insert;
    /// `uq_masters_user_id` backs it at the storage level.
    pub async fn create(pool: &PgPool, input: &CreateMaster) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO masters (user_id, info) VALUES ($1, $2) RETURNING id",
        )
        .bind(input.user_id)
        .bind(input.info.as_deref())
        .fetch_one(pool)
        .await
    }

    /// Find a master by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Master>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM masters WHERE id = $1");
        sqlx::query_as::<_, Master>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the master owned by a user.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Master>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM masters WHERE user_id = $1");
        sqlx::query_as::<_, Master>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List masters with optional filters. Without `pagination` every row is returned.
    pub async fn list(
        pool: &PgPool,
        pagination: Option<&Pagination>,
        filters: Option<&MasterFilters>,
    ) -> Result<Vec<Master>, sqlx::Error> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM masters WHERE TRUE"));

        if let Some(search) = filters
            .and_then(|f| f.search.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            qb.push(" AND info ILIKE ")
                .push_bind(format!("%{}%", escape_like(search)));
        }

        match filters.and_then(|f| f.created_at_order) {
            Some(order) => {
                qb.push(format!(
                    " ORDER BY created_at {dir}, id {dir}",
                    dir = order.as_sql()
                ));
            }
            None => {
                qb.push(" ORDER BY id ASC");
            }
        }

        if let Some(page) = pagination {
            qb.push(" LIMIT ")
                .push_bind(page.limit())
                .push(" OFFSET ")
                .push_bind(page.offset());
        }

        qb.build_query_as::<Master>().fetch_all(pool).await
    }

    /// Apply a partial update. Only `info` is mutable.
    ///
    /// Returns `false` when no row matched, or when the diff carries no change.
    pub async fn update(pool: &PgPool, input: &UpdateMaster) -> Result<bool, sqlx::Error> {
        let Some(info) = &input.info else {
            return Ok(false);
        };

        let result = sqlx::query("UPDATE masters SET info = $2 WHERE id = $1")
            .bind(input.id)
            .bind(info.as_deref())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
