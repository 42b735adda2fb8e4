//! Resource descriptors: columns, constraints, whitelist, filters and messages for one table.

/// Column storage type; drives DDL, SQL casts and value coercion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    Varchar,
    Text,
    Integer,
}

impl FieldType {
    pub fn pg_type(self) -> &'static str {
        match self {
            FieldType::Varchar => "varchar",
            FieldType::Text => "text",
            FieldType::Integer => "integer",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Email,
    Url,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Human-readable name used in constraint messages.
    pub label: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub unique: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub format: Option<Format>,
    pub allowed: Option<&'static [i64]>,
    pub minimum: Option<i64>,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, field_type: FieldType) -> Self {
        FieldSpec {
            name,
            label,
            field_type,
            required: false,
            unique: false,
            min_length: None,
            max_length: None,
            format: None,
            allowed: None,
            minimum: None,
        }
    }

    pub const fn varchar(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldType::Varchar)
    }

    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldType::Text)
    }

    pub const fn integer(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldType::Integer)
    }

    pub const fn required(self) -> Self {
        FieldSpec { required: true, ..self }
    }

    pub const fn unique(self) -> Self {
        FieldSpec { unique: true, ..self }
    }

    pub const fn length(self, min: usize, max: usize) -> Self {
        FieldSpec {
            min_length: Some(min),
            max_length: Some(max),
            ..self
        }
    }

    pub const fn format(self, format: Format) -> Self {
        FieldSpec {
            format: Some(format),
            ..self
        }
    }

    pub const fn one_of(self, allowed: &'static [i64]) -> Self {
        FieldSpec {
            allowed: Some(allowed),
            ..self
        }
    }

    pub const fn minimum(self, minimum: i64) -> Self {
        FieldSpec {
            minimum: Some(minimum),
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Contains,
}

/// A query parameter that narrows a list to one column.
#[derive(Clone, Copy, Debug)]
pub struct FilterSpec {
    pub param: &'static str,
    pub column: &'static str,
    pub mode: MatchMode,
}

impl FilterSpec {
    pub const fn exact(column: &'static str) -> Self {
        FilterSpec {
            param: column,
            column,
            mode: MatchMode::Exact,
        }
    }

    pub const fn contains(column: &'static str) -> Self {
        FilterSpec {
            param: column,
            column,
            mode: MatchMode::Contains,
        }
    }
}

/// Operator-facing messages for one resource.
#[derive(Clone, Copy, Debug)]
pub struct Messages {
    pub listed: &'static str,
    pub fetched: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub not_found: &'static str,
}

#[derive(Debug)]
pub struct ResourceSpec {
    pub table: &'static str,
    /// URL segment, also the plural key of list responses.
    pub path_segment: &'static str,
    /// Key wrapping a single record in responses.
    pub item_key: &'static str,
    pub fields: &'static [FieldSpec],
    /// Fields a request body may set. `None` means the body is applied as-is.
    pub whitelist: Option<&'static [&'static str]>,
    /// Checked in order; the last one present in the query wins.
    pub filters: &'static [FilterSpec],
    /// Columns never returned to clients.
    pub hidden: &'static [&'static str],
    pub messages: Messages,
}

pub const PRIMARY_KEY: &str = "id";
pub const TIMESTAMP_COLUMNS: [&str; 2] = ["created_at", "updated_at"];

impl ResourceSpec {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Every column in table order: id, declared fields, timestamps.
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(PRIMARY_KEY)
            .chain(self.fields.iter().map(|f| f.name))
            .chain(TIMESTAMP_COLUMNS)
    }
}
