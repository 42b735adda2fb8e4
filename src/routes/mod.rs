//! Route tables: admin resources and operational endpoints.

mod admin;
mod common;
pub use admin::admin_routes;
pub use common::{common_routes, common_routes_with_ready};
