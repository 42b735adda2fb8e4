//! Content admin: uniform CRUD endpoints for articles, categories, users and settings.

pub mod case;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod pattern;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, ErrorKind};
pub use migration::{apply_migrations, seed_settings};
pub use routes::{admin_routes, common_routes, common_routes_with_ready};
pub use service::{CrudService, SingletonService};
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store};

use axum::Router;

/// Full application router: operational routes at the root, admin resources under `prefix`.
pub fn app(state: AppState, prefix: &str) -> Router {
    let admin = admin_routes(state.clone());
    let root = common_routes_with_ready(state);
    if prefix.is_empty() || prefix == "/" {
        root.merge(admin)
    } else {
        root.nest(prefix, admin)
    }
}
