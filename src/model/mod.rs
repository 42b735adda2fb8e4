//! Static resource model: what each table holds and how clients may touch it.

pub mod resources;
pub mod spec;

pub use resources::{collection_by_path, ARTICLES, CATEGORIES, SETTINGS, USERS};
pub use spec::*;

/// One stored row as a JSON object keyed by column name.
pub type Record = serde_json::Map<String, serde_json::Value>;
