//! Column constraints enforced on every write, collecting one message per violated field.

use crate::error::AppError;
use crate::model::{FieldSpec, FieldType, Format, Record, ResourceSpec};
use crate::pattern::cached;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

pub struct Constraints;

impl Constraints {
    /// Check a full row about to be inserted: required fields must be present and non-null.
    /// Returns the row restricted to known columns, with integer strings coerced.
    pub fn check_insert(spec: &ResourceSpec, values: &Record) -> Result<Record, AppError> {
        let patterns = Patterns::load()?;
        let mut errors = Vec::new();
        let mut out = Record::new();
        for field in spec.fields {
            match values.get(field.name) {
                None | Some(Value::Null) if field.required => {
                    errors.push(format!("{}必须填写", field.label))
                }
                None => {}
                Some(v) => match check_field(field, v, &patterns) {
                    Ok(v) => {
                        out.insert(field.name.to_string(), v);
                    }
                    Err(msg) => errors.push(msg),
                },
            }
        }
        finish(out, errors)
    }

    /// Check only the fields present in an update; unknown keys are dropped.
    pub fn check_update(spec: &ResourceSpec, values: &Record) -> Result<Record, AppError> {
        let patterns = Patterns::load()?;
        let mut errors = Vec::new();
        let mut out = Record::new();
        for (name, v) in values {
            let Some(field) = spec.field(name) else { continue };
            if v.is_null() && field.required {
                errors.push(format!("{}必须填写", field.label));
                continue;
            }
            match check_field(field, v, &patterns) {
                Ok(v) => {
                    out.insert(name.clone(), v);
                }
                Err(msg) => errors.push(msg),
            }
        }
        finish(out, errors)
    }

    pub fn duplicate(field: &FieldSpec) -> String {
        format!("{}已存在", field.label)
    }
}

fn finish(out: Record, errors: Vec<String>) -> Result<Record, AppError> {
    if errors.is_empty() {
        Ok(out)
    } else {
        Err(AppError::Validation(errors))
    }
}

struct Patterns {
    email: &'static Regex,
    url: &'static Regex,
}

impl Patterns {
    fn load() -> Result<Self, AppError> {
        static EMAIL: OnceLock<Regex> = OnceLock::new();
        static URL: OnceLock<Regex> = OnceLock::new();
        Ok(Patterns {
            email: cached(&EMAIL, r"^[^@\s]+@[^@\s]+\.[^@\s]+$")?,
            url: cached(&URL, r"^https?://[^\s/$.?#][^\s]*$")?,
        })
    }

    fn matches(&self, format: Format, s: &str) -> bool {
        match format {
            Format::Email => self.email.is_match(s),
            Format::Url => self.url.is_match(s),
        }
    }
}

/// Validate one value and return its stored form.
fn check_field(field: &FieldSpec, v: &Value, patterns: &Patterns) -> Result<Value, String> {
    if v.is_null() {
        return Ok(Value::Null);
    }
    match field.field_type {
        FieldType::Integer => {
            let n = as_integer(v).ok_or_else(|| format!("{}必须是整数", field.label))?;
            if let Some(min) = field.minimum {
                if n < min {
                    return Err(format!("{}不能小于{}", field.label, min));
                }
            }
            if let Some(allowed) = field.allowed {
                if !allowed.contains(&n) {
                    let list: Vec<String> = allowed.iter().map(|a| a.to_string()).collect();
                    return Err(format!("{}的值必须是：{}", field.label, list.join(", ")));
                }
            }
            Ok(Value::Number(n.into()))
        }
        FieldType::Varchar | FieldType::Text => {
            let s = match v {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return Err(format!("{}必须是字符串", field.label)),
            };
            if field.required && s.trim().is_empty() {
                return Err(format!("{}必须填写", field.label));
            }
            let len = s.chars().count();
            if let (Some(min), Some(max)) = (field.min_length, field.max_length) {
                if len < min || len > max {
                    return Err(format!("{}长度需要在{} ~ {}个字符之间", field.label, min, max));
                }
            }
            if let Some(format) = field.format {
                if !s.is_empty() && !patterns.matches(format, &s) {
                    return Err(format!("{}格式不正确", field.label));
                }
            }
            Ok(Value::String(s))
        }
    }
}

fn as_integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
