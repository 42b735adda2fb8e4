//! In-process store with the same ordering, filtering and constraint semantics as PostgreSQL.

use super::{Constraints, Store};
use crate::error::AppError;
use crate::model::{Record, ResourceSpec, PRIMARY_KEY};
use crate::service::ListQuery;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Record>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<&'static str, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> Value {
    Value::String(chrono::Utc::now().to_rfc3339())
}

/// Messages for unique columns in `values` already held by a row other than `except`.
fn duplicates(spec: &ResourceSpec, table: &Table, values: &Record, except: Option<i64>) -> Vec<String> {
    spec.fields
        .iter()
        .filter(|f| f.unique)
        .filter_map(|f| {
            let v = values.get(f.name).filter(|v| !v.is_null())?;
            let taken = table
                .rows
                .iter()
                .any(|(id, row)| Some(*id) != except && row.get(f.name) == Some(v));
            taken.then(|| Constraints::duplicate(f))
        })
        .collect()
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_page(&self, spec: &ResourceSpec, query: &ListQuery) -> Result<(Vec<Record>, u64), AppError> {
        let tables = self.tables.read().await;
        let Some(table) = tables.get(spec.table) else { return Ok((Vec::new(), 0)) };
        let matching: Vec<&Record> = table
            .rows
            .values()
            .rev()
            .filter(|row| match &query.filter {
                Some(f) => f.matches(row.get(f.column)),
                None => true,
            })
            .collect();
        let total = matching.len() as u64;
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);
        let rows = matching.into_iter().skip(offset).take(limit).cloned().collect();
        Ok((rows, total))
    }

    async fn find_by_id(&self, spec: &ResourceSpec, id: i64) -> Result<Option<Record>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.get(spec.table).and_then(|t| t.rows.get(&id)).cloned())
    }

    async fn find_first(&self, spec: &ResourceSpec) -> Result<Option<Record>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(spec.table)
            .and_then(|t| t.rows.values().next())
            .cloned())
    }

    async fn insert(&self, spec: &ResourceSpec, values: &Record) -> Result<Record, AppError> {
        let checked = Constraints::check_insert(spec, values)?;
        let mut tables = self.tables.write().await;
        let table = tables.entry(spec.table).or_default();
        let dups = duplicates(spec, table, &checked, None);
        if !dups.is_empty() {
            return Err(AppError::Validation(dups));
        }
        table.last_id += 1;
        let id = table.last_id;
        let mut row = Record::new();
        row.insert(PRIMARY_KEY.to_string(), Value::Number(id.into()));
        for field in spec.fields {
            let v = checked.get(field.name).cloned().unwrap_or(Value::Null);
            row.insert(field.name.to_string(), v);
        }
        let stamp = now();
        row.insert("created_at".to_string(), stamp.clone());
        row.insert("updated_at".to_string(), stamp);
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, spec: &ResourceSpec, id: i64, values: &Record) -> Result<Record, AppError> {
        let checked = Constraints::check_update(spec, values)?;
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(spec.table)
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        let dups = duplicates(spec, table, &checked, Some(id));
        if !dups.is_empty() {
            return Err(AppError::Validation(dups));
        }
        let row = table
            .rows
            .get_mut(&id)
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        for (k, v) in checked {
            row.insert(k, v);
        }
        row.insert("updated_at".to_string(), now());
        Ok(row.clone())
    }

    async fn delete(&self, spec: &ResourceSpec, id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables
            .get_mut(spec.table)
            .and_then(|t| t.rows.remove(&id))
            .map(|_| ())
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CATEGORIES, USERS};
    use crate::service::PageRequest;
    use serde_json::json;

    fn record(v: Value) -> Record {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn ids_grow_and_pages_are_newest_first() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .insert(&CATEGORIES, &record(json!({"name": format!("cat-{i}"), "rank": i})))
                .await
                .unwrap();
        }
        let query = ListQuery {
            page: PageRequest {
                current_page: 2,
                page_size: 2,
            },
            filter: None,
        };
        let (rows, total) = store.find_page(&CATEGORIES, &query).await.unwrap();
        assert_eq!(total, 5);
        let ids: Vec<_> = rows.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!(3), json!(2)]);
    }

    #[tokio::test]
    async fn unique_columns_are_enforced_on_insert_and_update() {
        let store = MemoryStore::new();
        store
            .insert(&CATEGORIES, &record(json!({"name": "news", "rank": 1})))
            .await
            .unwrap();
        let second = store
            .insert(&CATEGORIES, &record(json!({"name": "tech", "rank": 2})))
            .await
            .unwrap();
        let err = store
            .insert(&CATEGORIES, &record(json!({"name": "news", "rank": 3})))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e == &vec!["名称已存在".to_string()]));

        let id = second["id"].as_i64().unwrap();
        let err = store
            .update(&CATEGORIES, id, &record(json!({"name": "news"})))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // Re-saving its own value is fine.
        assert!(store.update(&CATEGORIES, id, &record(json!({"name": "tech"}))).await.is_ok());
    }

    #[tokio::test]
    async fn missing_rows_are_generic_failures_on_write() {
        let store = MemoryStore::new();
        let err = store.delete(&USERS, 42).await.unwrap_err();
        assert!(matches!(err, AppError::Db(sqlx::Error::RowNotFound)));
        assert!(store.find_by_id(&USERS, 42).await.unwrap().is_none());
    }
}
