//! Regular expressions compiled once and shared across requests.

use crate::error::AppError;
use regex::Regex;
use std::sync::OnceLock;

/// The compiled `pattern`, built on first use. A pattern that fails to compile is an internal error.
pub fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> Result<&'static Regex, AppError> {
    if let Some(re) = cell.get() {
        return Ok(re);
    }
    let re = Regex::new(pattern).map_err(|e| AppError::Internal(format!("invalid pattern {}: {}", pattern, e)))?;
    Ok(cell.get_or_init(|| re))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn compiles_once_and_reuses() {
        static CELL: OnceLock<Regex> = OnceLock::new();
        let first = cached(&CELL, r"^\d+$").unwrap();
        let second = cached(&CELL, r"^\d+$").unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(first.is_match("42"));
    }

    #[test]
    fn bad_pattern_is_an_internal_error() {
        static CELL: OnceLock<Regex> = OnceLock::new();
        let err = cached(&CELL, r"(unclosed").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }
}
