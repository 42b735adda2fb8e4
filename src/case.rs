//! Response key casing: columns are snake_case in storage, camelCase on the wire.

use serde_json::{Map, Value};

/// Convert a single identifier from snake_case to camelCase.
/// e.g. "created_at" -> "createdAt"
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Rebuild an object with camelCase keys.
pub fn keys_to_camel_case(obj: Map<String, Value>) -> Map<String, Value> {
    obj.into_iter().map(|(k, v)| (to_camel_case(&k), v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_snake_case_keys() {
        assert_eq!(to_camel_case("updated_at"), "updatedAt");
        assert_eq!(to_camel_case("title"), "title");
        let Value::Object(obj) = json!({"created_at": 1, "nickname": "x"}) else { unreachable!() };
        assert_eq!(
            Value::Object(keys_to_camel_case(obj)),
            json!({"createdAt": 1, "nickname": "x"})
        );
    }
}
