//! Resource operations: list query parsing, whitelisting and the CRUD flow over a `Store`.

mod crud;
mod query;
mod whitelist;
pub use crud::{CrudService, Page, SingletonService};
pub use query::{Filter, ListQuery, PageRequest, Pagination, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use whitelist::permit;
