//! List query parameters: pagination window and the active column filter.

use crate::error::AppError;
use crate::model::{FieldType, MatchMode, ResourceSpec};
use crate::pattern::cached;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Upper bound for page numbers and sizes; PostgreSQL's LIMIT/OFFSET are BIGINT.
pub const MAX_PAGE_VALUE: u64 = i64::MAX as u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub current_page: u64,
    pub page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            current_page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        Ok(PageRequest {
            current_page: positive_int(params.get("currentPage"))?.unwrap_or(DEFAULT_PAGE),
            page_size: positive_int(params.get("pageSize"))?.unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }

    pub fn offset(&self) -> u64 {
        self.current_page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(MAX_PAGE_VALUE)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

/// Leading integer of the value (`"2abc"` is 2), capped at [`MAX_PAGE_VALUE`].
/// Zero, negative and unparsable values yield `None`.
fn positive_int(raw: Option<&String>) -> Result<Option<u64>, AppError> {
    static LEADING_INT: OnceLock<Regex> = OnceLock::new();
    let re = cached(&LEADING_INT, r"^\s*\+?(\d+)")?;
    let Some(digits) = raw.and_then(|r| re.captures(r)).and_then(|c| c.get(1)) else {
        return Ok(None);
    };
    let digits = digits.as_str().trim_start_matches('0');
    if digits.is_empty() {
        return Ok(None);
    }
    let n = digits.parse::<u64>().unwrap_or(MAX_PAGE_VALUE);
    Ok(Some(n.min(MAX_PAGE_VALUE)))
}

/// Pagination descriptor echoed back in list responses.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub page_size: u64,
    pub total: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub mode: MatchMode,
    /// Number for integer columns when the parameter parses, string otherwise.
    pub value: Value,
}

impl Filter {
    pub fn matches(&self, candidate: Option<&Value>) -> bool {
        let Some(candidate) = candidate else { return false };
        match self.mode {
            MatchMode::Exact => candidate == &self.value,
            MatchMode::Contains => match (candidate.as_str(), self.value.as_str()) {
                (Some(haystack), Some(needle)) => haystack.contains(needle),
                _ => false,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListQuery {
    pub page: PageRequest,
    pub filter: Option<Filter>,
}

impl ListQuery {
    /// Filters are checked in declaration order and each present one replaces the previous,
    /// so at most one is active.
    pub fn from_params(spec: &ResourceSpec, params: &HashMap<String, String>) -> Result<Self, AppError> {
        let mut filter = None;
        for f in spec.filters {
            let Some(raw) = params.get(f.param).filter(|v| !v.is_empty()) else { continue };
            let is_integer = spec
                .field(f.column)
                .map(|c| c.field_type == FieldType::Integer)
                .unwrap_or(false);
            let value = match raw.trim().parse::<i64>() {
                Ok(n) if is_integer && f.mode == MatchMode::Exact => Value::Number(n.into()),
                _ => Value::String(raw.clone()),
            };
            filter = Some(Filter {
                column: f.column,
                mode: f.mode,
                value,
            });
        }
        Ok(ListQuery {
            page: PageRequest::from_params(params)?,
            filter,
        })
    }
}
