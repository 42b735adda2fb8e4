//! Schema setup: DDL generated from the resource descriptors, plus the settings seed.

use crate::error::AppError;
use crate::model::{resources, FieldSpec, FieldType, Record, ResourceSpec, SETTINGS};
use crate::sql::quoted;
use crate::store::Store;
use serde_json::Value;
use sqlx::PgPool;

fn column_def(field: &FieldSpec) -> String {
    let typ = match field.field_type {
        FieldType::Varchar => "VARCHAR(255)",
        FieldType::Text => "TEXT",
        FieldType::Integer => "INTEGER",
    };
    let mut def = format!("{} {}", quoted(field.name), typ);
    if field.required {
        def.push_str(" NOT NULL");
    }
    if field.unique {
        def.push_str(" UNIQUE");
    }
    def
}

/// `CREATE TABLE IF NOT EXISTS` for one resource. Unique constraints get PostgreSQL's default
/// `<table>_<column>_key` names, which the store relies on to report the offending field.
pub fn create_table_sql(spec: &ResourceSpec) -> String {
    let mut defs = vec![format!("{} BIGSERIAL PRIMARY KEY", quoted("id"))];
    defs.extend(spec.fields.iter().map(column_def));
    defs.push(format!("{} TIMESTAMPTZ NOT NULL DEFAULT NOW()", quoted("created_at")));
    defs.push(format!("{} TIMESTAMPTZ NOT NULL DEFAULT NOW()", quoted("updated_at")));
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        quoted(spec.table),
        defs.join(",\n    ")
    )
}

/// Create every resource table that does not exist yet.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for spec in resources::ALL {
        let ddl = create_table_sql(spec);
        tracing::debug!(table = spec.table, "ensuring table");
        sqlx::query(&ddl).execute(pool).await?;
    }
    Ok(())
}

/// Insert the singleton settings row when none exists. Returns whether a row was created.
pub async fn seed_settings(store: &dyn Store) -> Result<bool, AppError> {
    if store.find_first(&SETTINGS).await?.is_some() {
        return Ok(false);
    }
    let mut values = Record::new();
    values.insert("title".into(), Value::String("Content Admin".into()));
    values.insert("content".into(), Value::String(String::new()));
    store.insert(&SETTINGS, &values).await?;
    tracing::info!("seeded initial settings");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CATEGORIES;
    use crate::store::MemoryStore;

    #[test]
    fn ddl_follows_the_descriptor() {
        let ddl = create_table_sql(&CATEGORIES);
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS \"categories\""));
        assert!(ddl.contains("\"id\" BIGSERIAL PRIMARY KEY"));
        assert!(ddl.contains("\"name\" VARCHAR(255) NOT NULL UNIQUE"));
        assert!(ddl.contains("\"rank\" INTEGER NOT NULL"));
        assert!(ddl.contains("\"updated_at\" TIMESTAMPTZ NOT NULL DEFAULT NOW()"));
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let store = MemoryStore::new();
        assert!(seed_settings(&store).await.unwrap());
        assert!(!seed_settings(&store).await.unwrap());
        let row = store.find_first(&SETTINGS).await.unwrap().unwrap();
        assert_eq!(row["title"], "Content Admin");
    }
}
