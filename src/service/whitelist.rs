//! Projection of a request body onto the fields a resource lets clients set.

use crate::model::{Record, ResourceSpec};
use serde_json::Value;

/// Keeps only whitelisted keys present in `body`; anything else is dropped silently.
/// A body that is not an object contributes nothing. Resources without a whitelist
/// take the body as-is.
pub fn permit(spec: &ResourceSpec, body: Value) -> Record {
    let Value::Object(body) = body else { return Record::new() };
    let Some(allowed) = spec.whitelist else { return body };
    body.into_iter()
        .filter(|(k, _)| allowed.contains(&k.as_str()))
        .collect()
}
