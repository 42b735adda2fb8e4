//! HTTP handlers for the collection resources and the settings singleton.

pub mod resource;
pub mod setting;
pub use resource::*;
pub use setting::*;

use crate::case::keys_to_camel_case;
use crate::model::{Record, ResourceSpec};
use serde_json::Value;

/// Client view of a stored row: hidden columns removed, keys in camelCase.
pub(crate) fn present(spec: &ResourceSpec, mut record: Record) -> Value {
    for column in spec.hidden {
        record.remove(*column);
    }
    Value::Object(keys_to_camel_case(record))
}

/// `{<key>: record}` payload for single-record responses.
pub(crate) fn item_payload(spec: &ResourceSpec, record: Record) -> Value {
    let mut data = serde_json::Map::new();
    data.insert(spec.item_key.to_string(), present(spec, record));
    Value::Object(data)
}
