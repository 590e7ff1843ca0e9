//! Repository for the `toys` table and its child tables
//! `toys_tags_associations` and `toys_attachments`.
//!
//! Every write that touches more than one table runs in a single
//! transaction. Within `update`, statements run in a fixed order:
//! scalar update, association deletes, association inserts, attachment
//! deletes, attachment inserts.

use sqlx::{PgPool, Postgres, QueryBuilder};
use toycraft_core::pagination::Pagination;
use toycraft_core::types::DbId;

use crate::models::toy::{CreateToy, Toy, ToyFilters, UpdateToy};

/// Column list for `toys` queries.
const COLUMNS: &str = "id, master_id, category_id, name, description, price, quantity, \
    created_at, updated_at";

/// Provides CRUD and diff-application operations for toys.
pub struct ToyRepo;

impl ToyRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find a toy row by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Toy>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM toys WHERE id = $1");
        sqlx::query_as::<_, Toy>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List toy rows matching `filters`.
    ///
    /// Without `pagination` every matching row is returned.
    pub async fn list(
        pool: &PgPool,
        pagination: Option<&Pagination>,
        filters: Option<&ToyFilters>,
    ) -> Result<Vec<Toy>, sqlx::Error> {
        Self::list_scoped(pool, None, pagination, filters).await
    }

    /// List the toy rows owned by one master.
    pub async fn list_by_master(
        pool: &PgPool,
        master_id: DbId,
        pagination: Option<&Pagination>,
        filters: Option<&ToyFilters>,
    ) -> Result<Vec<Toy>, sqlx::Error> {
        Self::list_scoped(pool, Some(master_id), pagination, filters).await
    }

    /// Count toys matching `filters`.
    pub async fn count(pool: &PgPool, filters: Option<&ToyFilters>) -> Result<i64, sqlx::Error> {
        Self::count_scoped(pool, None, filters).await
    }

    /// Count toys owned by one master matching `filters`.
    pub async fn count_by_master(
        pool: &PgPool,
        master_id: DbId,
        filters: Option<&ToyFilters>,
    ) -> Result<i64, sqlx::Error> {
        Self::count_scoped(pool, Some(master_id), filters).await
    }

    async fn list_scoped(
        pool: &PgPool,
        master_id: Option<DbId>,
        pagination: Option<&Pagination>,
        filters: Option<&ToyFilters>,
    ) -> Result<Vec<Toy>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM toys WHERE TRUE"));
        push_filters(&mut qb, master_id, filters);

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

        qb.build_query_as::<Toy>().fetch_all(pool).await
    }

    async fn count_scoped(
        pool: &PgPool,
        master_id: Option<DbId>,
        filters: Option<&ToyFilters>,
    ) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM toys WHERE TRUE");
        push_filters(&mut qb, master_id, filters);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a toy with its tag associations and attachments.
    ///
    /// All three inserts share one transaction; on any failure nothing is kept.
    pub async fn create(pool: &PgPool, input: &CreateToy) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let toy_id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO toys (master_id, category_id, name, description, price, quantity) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(input.master_id)
        .bind(input.category_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.quantity)
        .fetch_one(&mut *tx)
        .await?;

        Self::insert_tags_inner(&mut tx, toy_id, &input.tag_ids).await?;
        Self::insert_attachments_inner(&mut tx, toy_id, &input.attachments).await?;

        tx.commit().await?;
        Ok(toy_id)
    }

    /// Apply a toy diff atomically.
    ///
    /// The toy row is locked first; returns `false` without writing when it no
    /// longer exists. The column update is skipped when the diff carries no
    /// scalar field, and each collection step is skipped when its set is
    /// empty. A no-op diff returns `true` without touching the database.
    pub async fn update(pool: &PgPool, diff: &UpdateToy) -> Result<bool, sqlx::Error> {
        if diff.is_noop() {
            return Ok(true);
        }

        let mut tx = pool.begin().await?;

        let locked = sqlx::query_scalar::<_, DbId>("SELECT id FROM toys WHERE id = $1 FOR UPDATE")
            .bind(diff.id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(false);
        }

        if diff.has_scalar_changes() {
            sqlx::query(
                "UPDATE toys SET \
                    category_id = COALESCE($2, category_id), \
                    name = COALESCE($3, name), \
                    description = COALESCE($4, description), \
                    price = COALESCE($5, price), \
                    quantity = COALESCE($6, quantity) \
                 WHERE id = $1",
            )
            .bind(diff.id)
            .bind(diff.category_id)
            .bind(diff.name.as_deref())
            .bind(diff.description.as_deref())
            .bind(diff.price)
            .bind(diff.quantity)
            .execute(&mut *tx)
            .await?;
        }

        if !diff.tag_ids_to_delete.is_empty() {
            sqlx::query(
                "DELETE FROM toys_tags_associations \
                 WHERE toy_id = $1 AND tag_id = ANY($2)",
            )
            .bind(diff.id)
            .bind(&diff.tag_ids_to_delete)
            .execute(&mut *tx)
            .await?;
        }

        Self::insert_tags_inner(&mut tx, diff.id, &diff.tag_ids_to_add).await?;

        if !diff.attachment_ids_to_delete.is_empty() {
            sqlx::query(
                "DELETE FROM toys_attachments \
                 WHERE toy_id = $1 AND id = ANY($2)",
            )
            .bind(diff.id)
            .bind(&diff.attachment_ids_to_delete)
            .execute(&mut *tx)
            .await?;
        }

        Self::insert_attachments_inner(&mut tx, diff.id, &diff.attachments_to_add).await?;

        tx.commit().await?;

        tracing::debug!(
            toy_id = diff.id,
            tags_added = diff.tag_ids_to_add.len(),
            tags_deleted = diff.tag_ids_to_delete.len(),
            attachments_added = diff.attachments_to_add.len(),
            attachments_deleted = diff.attachment_ids_to_delete.len(),
            "Toy diff applied",
        );
        Ok(true)
    }

    /// Delete a toy by ID. Associations and attachments go by cascade.
    ///
    /// Returns `true` if a toy was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM toys WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Bulk-insert `(toy_id, tag_id)` rows in one statement. Repeated ids collapse.
    async fn insert_tags_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        toy_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if tag_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO toys_tags_associations (toy_id, tag_id) \
             SELECT DISTINCT $1::BIGINT, t.tag_id FROM UNNEST($2::BIGINT[]) AS t(tag_id)",
        )
        .bind(toy_id)
        .bind(tag_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Bulk-insert attachment rows in one statement.
    async fn insert_attachments_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        toy_id: DbId,
        links: &[String],
    ) -> Result<(), sqlx::Error> {
        if links.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO toys_attachments (toy_id, link) \
             SELECT $1::BIGINT, a.link FROM UNNEST($2::TEXT[]) AS a(link)",
        )
        .bind(toy_id)
        .bind(links)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Append the shared toy predicate to a query that already ends in `WHERE TRUE`.
fn push_filters(
    qb: &mut QueryBuilder<'_, Postgres>,
    master_id: Option<DbId>,
    filters: Option<&ToyFilters>,
) {
    if let Some(master_id) = master_id {
        qb.push(" AND master_id = ").push_bind(master_id);
    }

    let Some(filters) = filters else {
        return;
    };

    if let Some(search) = filters
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let pattern = format!("%{}%", escape_like(search));
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(floor) = filters.price_floor {
        qb.push(" AND price >= ").push_bind(floor);
    }
    if let Some(ceil) = filters.price_ceil {
        qb.push(" AND price <= ").push_bind(ceil);
    }
    if let Some(floor) = filters.quantity_floor {
        qb.push(" AND quantity >= ").push_bind(floor);
    }
    if !filters.category_ids.is_empty() {
        qb.push(" AND category_id = ANY(")
            .push_bind(filters.category_ids.clone())
            .push(")");
    }
    if !filters.tag_ids.is_empty() {
        qb.push(
            " AND id IN (SELECT toy_id FROM toys_tags_associations WHERE tag_id = ANY(",
        )
        .push_bind(filters.tag_ids.clone())
        .push("))");
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
