//! Resource operations composed from the accessor, whitelist and list query over a `Store`.

use super::query::{ListQuery, Pagination};
use super::whitelist::permit;
use crate::error::AppError;
use crate::model::{Record, ResourceSpec};
use crate::store::Store;
use serde_json::Value;
use std::collections::HashMap;

pub struct Page {
    pub items: Vec<Record>,
    pub pagination: Pagination,
}

pub struct CrudService;

impl CrudService {
    /// Parse pagination and filter from the query string and fetch one page.
    pub async fn list(
        store: &dyn Store,
        spec: &ResourceSpec,
        params: &HashMap<String, String>,
    ) -> Result<Page, AppError> {
        let query = ListQuery::from_params(spec, params)?;
        let (items, total) = store.find_page(spec, &query).await?;
        Ok(Page {
            items,
            pagination: Pagination {
                current_page: query.page.current_page,
                page_size: query.page.page_size,
                total,
            },
        })
    }

    /// The row with this id, or the resource's not-found error. Ids that are not
    /// integers cannot exist and fail the same way.
    pub async fn find(store: &dyn Store, spec: &ResourceSpec, id: &str) -> Result<(i64, Record), AppError> {
        let not_found = || AppError::NotFound(spec.messages.not_found.to_string());
        let id: i64 = id.trim().parse().map_err(|_| not_found())?;
        let row = store.find_by_id(spec, id).await?.ok_or_else(not_found)?;
        Ok((id, row))
    }

    pub async fn create(store: &dyn Store, spec: &ResourceSpec, body: Value) -> Result<Record, AppError> {
        let values = permit(spec, body);
        store.insert(spec, &values).await
    }

    pub async fn update(store: &dyn Store, spec: &ResourceSpec, id: &str, body: Value) -> Result<Record, AppError> {
        let (id, _) = Self::find(store, spec, id).await?;
        let values = permit(spec, body);
        store.update(spec, id, &values).await
    }

    pub async fn delete(store: &dyn Store, spec: &ResourceSpec, id: &str) -> Result<(), AppError> {
        let (id, _) = Self::find(store, spec, id).await?;
        store.delete(spec, id).await
    }
}

/// Operations on a singleton resource: one row, no id routing, no creation or deletion.
pub struct SingletonService;

impl SingletonService {
    /// The single row. Its absence means the seed never ran.
    pub async fn get(store: &dyn Store, spec: &ResourceSpec) -> Result<(i64, Record), AppError> {
        let row = store
            .find_first(spec)
            .await?
            .ok_or_else(|| AppError::NotFound(spec.messages.not_found.to_string()))?;
        let id = row
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| AppError::Internal(format!("{} row has no id", spec.table)))?;
        Ok((id, row))
    }

    pub async fn update(store: &dyn Store, spec: &ResourceSpec, body: Value) -> Result<Record, AppError> {
        let (id, _) = Self::get(store, spec).await?;
        let values = permit(spec, body);
        store.update(spec, id, &values).await
    }
}
