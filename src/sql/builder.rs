//! Builds parameterized SELECT, COUNT, INSERT, UPDATE, DELETE from a resource descriptor.

use crate::model::{MatchMode, Record, ResourceSpec, PRIMARY_KEY};
use crate::service::{Filter, ListQuery};
use serde_json::Value;

/// Quote identifier for PostgreSQL (safe: only from static descriptors).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Placeholder with a cast to the column type so text and number binds both land correctly.
fn placeholder(spec: &ResourceSpec, column: &str, n: usize) -> String {
    spec.field(column)
        .map(|f| format!("${}::{}", n, f.field_type.pg_type()))
        .unwrap_or_else(|| format!("${}", n))
}

fn select_column_list(spec: &ResourceSpec) -> String {
    spec.columns().map(quoted).collect::<Vec<_>>().join(", ")
}

/// WHERE clause for the active filter, if any. A number filter on a text value, or a
/// text value on an integer column, can never match.
fn where_clause(spec: &ResourceSpec, filter: Option<&Filter>, q: &mut QueryBuf) -> String {
    let Some(f) = filter else { return String::new() };
    let integer_column = spec
        .field(f.column)
        .map(|c| c.field_type == crate::model::FieldType::Integer)
        .unwrap_or(false);
    match (f.mode, &f.value) {
        (MatchMode::Exact, Value::String(_)) if integer_column => " WHERE FALSE".to_string(),
        (MatchMode::Exact, v) => {
            let n = q.push_param(v.clone());
            format!(" WHERE {} = {}", quoted(f.column), placeholder(spec, f.column, n))
        }
        (MatchMode::Contains, v) => {
            let needle = v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string());
            let n = q.push_param(Value::String(format!("%{}%", escape_like(&needle))));
            format!(" WHERE {} LIKE ${} ESCAPE '\\'", quoted(f.column), n)
        }
    }
}

/// Escape LIKE metacharacters so the needle matches literally, as a substring.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// One page of rows, newest id first.
pub fn select_page(spec: &ResourceSpec, query: &ListQuery) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = where_clause(spec, query.filter.as_ref(), &mut q);
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {} DESC LIMIT {} OFFSET {}",
        select_column_list(spec),
        quoted(spec.table),
        where_clause,
        quoted(PRIMARY_KEY),
        query.page.limit(),
        query.page.offset()
    );
    q
}

/// Number of rows matching the filter, ignoring the page window.
pub fn count(spec: &ResourceSpec, filter: Option<&Filter>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = where_clause(spec, filter, &mut q);
    q.sql = format!("SELECT COUNT(*) FROM {}{}", quoted(spec.table), where_clause);
    q
}

/// SELECT by primary key. Caller binds the id as `$1`.
pub fn select_by_id(spec: &ResourceSpec) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list(spec),
        quoted(spec.table),
        quoted(PRIMARY_KEY)
    );
    q
}

/// Lowest-id row, for singleton tables.
pub fn select_first(spec: &ResourceSpec) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {} LIMIT 1",
        select_column_list(spec),
        quoted(spec.table),
        quoted(PRIMARY_KEY)
    );
    q
}

/// INSERT of the declared fields present in `values`; id and timestamps come from column defaults.
pub fn insert(spec: &ResourceSpec, values: &Record) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for field in spec.fields {
        let Some(v) = values.get(field.name) else { continue };
        let n = q.push_param(v.clone());
        cols.push(quoted(field.name));
        placeholders.push(placeholder(spec, field.name, n));
    }
    q.sql = if cols.is_empty() {
        format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING {}",
            quoted(spec.table),
            select_column_list(spec)
        )
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(spec.table),
            cols.join(", "),
            placeholders.join(", "),
            select_column_list(spec)
        )
    };
    q
}

/// UPDATE by id: SET only declared fields present in `values`, always touching `updated_at`.
pub fn update(spec: &ResourceSpec, id: i64, values: &Record) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for field in spec.fields {
        let Some(v) = values.get(field.name) else { continue };
        let n = q.push_param(v.clone());
        sets.push(format!("{} = {}", quoted(field.name), placeholder(spec, field.name, n)));
    }
    sets.push(format!("{} = NOW()", quoted("updated_at")));
    let id_param = q.push_param(Value::Number(id.into()));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(spec.table),
        sets.join(", "),
        quoted(PRIMARY_KEY),
        id_param,
        select_column_list(spec)
    );
    q
}

/// DELETE by id. Caller binds the id as `$1`.
pub fn delete(spec: &ResourceSpec) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "DELETE FROM {} WHERE {} = $1 RETURNING {}",
        quoted(spec.table),
        quoted(PRIMARY_KEY),
        quoted(PRIMARY_KEY)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ARTICLES, CATEGORIES, SETTINGS, USERS};
    use crate::service::PageRequest;
    use serde_json::json;

    #[test]
    fn page_query_orders_by_id_desc_with_window() {
        let query = ListQuery {
            page: PageRequest {
                current_page: 2,
                page_size: 5,
            },
            filter: Some(Filter {
                column: "title",
                mode: MatchMode::Contains,
                value: json!("foo"),
            }),
        };
        let q = select_page(&ARTICLES, &query);
        assert_eq!(
            q.sql,
            "SELECT \"id\", \"title\", \"content\", \"created_at\", \"updated_at\" FROM \"articles\" \
             WHERE \"title\" LIKE $1 ESCAPE '\\' ORDER BY \"id\" DESC LIMIT 5 OFFSET 5"
        );
        assert_eq!(q.params, vec![json!("%foo%")]);
    }

    #[test]
    fn count_shares_the_filter() {
        let filter = Filter {
            column: "role",
            mode: MatchMode::Exact,
            value: json!(100),
        };
        let q = count(&USERS, Some(&filter));
        assert_eq!(q.sql, "SELECT COUNT(*) FROM \"users\" WHERE \"role\" = $1::integer");
        assert_eq!(q.params, vec![json!(100)]);
    }

    #[test]
    fn text_value_on_integer_column_matches_nothing() {
        let filter = Filter {
            column: "role",
            mode: MatchMode::Exact,
            value: json!("admin"),
        };
        let q = count(&USERS, Some(&filter));
        assert!(q.sql.ends_with("WHERE FALSE"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn insert_binds_only_present_fields() {
        let mut values = Record::new();
        values.insert("name".into(), json!("news"));
        let q = insert(&CATEGORIES, &values);
        assert!(q.sql.starts_with("INSERT INTO \"categories\" (\"name\") VALUES ($1::varchar) RETURNING"));
        assert_eq!(q.params, vec![json!("news")]);
    }

    #[test]
    fn update_touches_updated_at_and_binds_id_last() {
        let mut values = Record::new();
        values.insert("content".into(), json!("hello"));
        let q = update(&SETTINGS, 1, &values);
        assert!(q.sql.starts_with(
            "UPDATE \"settings\" SET \"content\" = $1::text, \"updated_at\" = NOW() WHERE \"id\" = $2"
        ));
        assert_eq!(q.params, vec![json!("hello"), json!(1)]);
    }

    #[test]
    fn like_metacharacters_in_the_needle_match_literally() {
        let filter = Filter {
            column: "title",
            mode: MatchMode::Contains,
            value: json!(r"50%_off\now"),
        };
        let q = count(&ARTICLES, Some(&filter));
        assert_eq!(q.sql, "SELECT COUNT(*) FROM \"articles\" WHERE \"title\" LIKE $1 ESCAPE '\\'");
        assert_eq!(q.params, vec![json!(r"%50\%\_off\\now%")]);
    }
}
