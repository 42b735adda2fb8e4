//! Storage collaborator: the relational data-access seam the handlers depend on.

mod constraints;
mod memory;
mod postgres;

pub use constraints::Constraints;
pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::model::{Record, ResourceSpec};
use crate::service::ListQuery;
use async_trait::async_trait;

/// Row access for one resource at a time. Writes enforce the resource's column
/// constraints and fail with `AppError::Validation` when they are violated.
#[async_trait]
pub trait Store: Send + Sync {
    /// Rows of the requested page (id descending) and the total matching the filter.
    async fn find_page(&self, spec: &ResourceSpec, query: &ListQuery) -> Result<(Vec<Record>, u64), AppError>;

    async fn find_by_id(&self, spec: &ResourceSpec, id: i64) -> Result<Option<Record>, AppError>;

    /// Lowest-id row, used for singleton resources.
    async fn find_first(&self, spec: &ResourceSpec) -> Result<Option<Record>, AppError>;

    async fn insert(&self, spec: &ResourceSpec, values: &Record) -> Result<Record, AppError>;

    /// Set the given columns on row `id`. Fails with `Db(RowNotFound)` if the row is gone.
    async fn update(&self, spec: &ResourceSpec, id: i64, values: &Record) -> Result<Record, AppError>;

    /// Fails with `Db(RowNotFound)` if the row is gone.
    async fn delete(&self, spec: &ResourceSpec, id: i64) -> Result<(), AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
