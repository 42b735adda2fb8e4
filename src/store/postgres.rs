//! PostgreSQL-backed store using the parameterized SQL builder.

use super::{Constraints, Store};
use crate::error::AppError;
use crate::model::{Record, ResourceSpec};
use crate::service::ListQuery;
use crate::sql::{self, bind_all, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    async fn fetch_optional(&self, spec: &ResourceSpec, q: &QueryBuf) -> Result<Option<Record>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(spec, e))?;
        Ok(row.map(|r| row_to_record(&r)))
    }

    async fn fetch_one(&self, spec: &ResourceSpec, q: &QueryBuf) -> Result<Record, AppError> {
        self.fetch_optional(spec, q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_page(&self, spec: &ResourceSpec, query: &ListQuery) -> Result<(Vec<Record>, u64), AppError> {
        let q = sql::select_page(spec, query);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;

        let c = sql::count(spec, query.filter.as_ref());
        tracing::debug!(sql = %c.sql, params = ?c.params, "query");
        let total: i64 = {
            use sqlx::Row;
            bind_all(sqlx::query(&c.sql), &c.params)
                .fetch_one(&self.pool)
                .await?
                .try_get(0)?
        };
        Ok((
            rows.iter().map(row_to_record).collect(),
            u64::try_from(total).unwrap_or(0),
        ))
    }

    async fn find_by_id(&self, spec: &ResourceSpec, id: i64) -> Result<Option<Record>, AppError> {
        let mut q = sql::select_by_id(spec);
        q.params.push(Value::Number(id.into()));
        self.fetch_optional(spec, &q).await
    }

    async fn find_first(&self, spec: &ResourceSpec) -> Result<Option<Record>, AppError> {
        self.fetch_optional(spec, &sql::select_first(spec)).await
    }

    async fn insert(&self, spec: &ResourceSpec, values: &Record) -> Result<Record, AppError> {
        let checked = Constraints::check_insert(spec, values)?;
        self.fetch_one(spec, &sql::insert(spec, &checked)).await
    }

    async fn update(&self, spec: &ResourceSpec, id: i64, values: &Record) -> Result<Record, AppError> {
        let checked = Constraints::check_update(spec, values)?;
        self.fetch_one(spec, &sql::update(spec, id, &checked)).await
    }

    async fn delete(&self, spec: &ResourceSpec, id: i64) -> Result<(), AppError> {
        let mut q = sql::delete(spec);
        q.params.push(Value::Number(id.into()));
        self.fetch_one(spec, &q).await.map(|_| ())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Constraint violations raised by the database become validation errors; the rest stay `Db`.
fn map_db_error(spec: &ResourceSpec, err: sqlx::Error) -> AppError {
    let sqlx::Error::Database(db) = &err else { return AppError::Db(err) };
    let code = db.code().map(|c| c.into_owned());
    match constraint_message(spec, code.as_deref(), db.constraint(), db.message()) {
        Some(message) => AppError::Validation(vec![message]),
        None => AppError::Db(err),
    }
}

/// Message for a SQLSTATE that reports a violated column constraint, `None` for any other code.
/// A unique violation on `{table}_{column}_key` names the column's label.
fn constraint_message(
    spec: &ResourceSpec,
    code: Option<&str>,
    constraint: Option<&str>,
    message: &str,
) -> Option<String> {
    match code? {
        "23505" => {
            let constraint = constraint.unwrap_or_default();
            let duplicate = spec
                .fields
                .iter()
                .find(|f| f.unique && constraint == format!("{}_{}_key", spec.table, f.name))
                .map(Constraints::duplicate);
            Some(duplicate.unwrap_or_else(|| message.to_string()))
        }
        "23502" | "23514" | "22001" => Some(message.to_string()),
        _ => None,
    }
}

fn row_to_record(row: &PgRow) -> Record {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = Record::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    map
}

fn cell_to_value(row: &PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    Value::Null
}
