use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    store::{DataAccessError, DataStore, Guarded, OrderBy, Record, guard_holds, merge_patch},
    utils::sql,
};

/// PostgreSQL-backed store. Every table lives in the shared `records`
/// relation as a JSONB document keyed by `(table_name, id)`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Locks the row, checks the optional guard, then writes the merged
    /// document, all in one transaction.
    async fn patch_record<R: Record>(
        &self,
        id: Uuid,
        guard: Option<(&str, &Value)>,
        patch: Value,
    ) -> Result<Guarded<R>, DataAccessError> {
        if !patch.is_object() {
            return Err(DataAccessError::InvalidPatch(
                "patch must be a JSON object".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        let current: Option<Value> = sqlx::query_scalar(&sql(r#"
            SELECT data FROM records
            WHERE table_name = ? AND id = ?
            FOR UPDATE
        "#))
        .bind(R::TABLE)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut merged) = current else {
            return Ok(Guarded::Missing);
        };
        if let Some((field, expected)) = guard {
            if !guard_holds(&merged, field, expected) {
                log::debug!("Guarded update of {} in {} found a stale {}", id, R::TABLE, field);
                return Ok(Guarded::Stale);
            }
        }

        // Validate the merged document before writing it back
        merge_patch(&mut merged, &patch)?;
        let record: R = serde_json::from_value(merged.clone())?;

        sqlx::query(&sql(r#"
            UPDATE records SET data = ?
            WHERE table_name = ? AND id = ?
        "#))
        .bind(merged)
        .bind(R::TABLE)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(Guarded::Updated(record))
    }
}

impl DataStore for PgStore {
    async fn fetch_all<R: Record>(
        &self,
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<R>, DataAccessError> {
        let rows: Vec<Value> = match order_by {
            Some(order) => {
                // Direction can't be bound, so pick between two static statements
                let query = if order.ascending {
                    sql(r#"
                        SELECT data FROM records
                        WHERE table_name = ?
                        ORDER BY data -> ?::text ASC NULLS FIRST, created_at ASC
                    "#)
                } else {
                    sql(r#"
                        SELECT data FROM records
                        WHERE table_name = ?
                        ORDER BY data -> ?::text DESC NULLS LAST, created_at ASC
                    "#)
                };
                sqlx::query_scalar(&query)
                    .bind(R::TABLE)
                    .bind(order.field.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar(&sql(r#"
                    SELECT data FROM records
                    WHERE table_name = ?
                    ORDER BY created_at ASC
                "#))
                .bind(R::TABLE)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(DataAccessError::from))
            .collect()
    }

    async fn fetch_one<R: Record>(&self, id: Uuid) -> Result<Option<R>, DataAccessError> {
        let row: Option<Value> = sqlx::query_scalar(&sql(r#"
            SELECT data FROM records
            WHERE table_name = ? AND id = ?
        "#))
        .bind(R::TABLE)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(serde_json::from_value).transpose()?)
    }

    async fn insert<R: Record>(&self, record: R) -> Result<R, DataAccessError> {
        let data = serde_json::to_value(&record)?;

        sqlx::query(&sql(r#"
            INSERT INTO records (table_name, id, data)
            VALUES (?, ?, ?)
        "#))
        .bind(R::TABLE)
        .bind(record.id())
        .bind(data)
        .execute(&self.pool)
        .await?;

        log::debug!("Inserted {} into {}", record.id(), R::TABLE);
        Ok(record)
    }

    async fn update<R: Record>(&self, id: Uuid, patch: Value) -> Result<Option<R>, DataAccessError> {
        Ok(self.patch_record::<R>(id, None, patch).await?.updated())
    }

    async fn update_if<R: Record>(
        &self,
        id: Uuid,
        field: &str,
        expected: Value,
        patch: Value,
    ) -> Result<Guarded<R>, DataAccessError> {
        self.patch_record::<R>(id, Some((field, &expected)), patch)
            .await
    }

    async fn delete<R: Record>(&self, id: Uuid) -> Result<bool, DataAccessError> {
        let result = sqlx::query(&sql(r#"
            DELETE FROM records
            WHERE table_name = ? AND id = ?
        "#))
        .bind(R::TABLE)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
