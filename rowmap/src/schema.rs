use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::bail;
use crate::error::{ErrorKind, RowMapResult};

/// Declared type of a result column.
///
/// These are the scalar column types a BigQuery-style query service reports in
/// the schema attached to each page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Bytes,
    Integer,
    Float,
    Boolean,
    Timestamp,
    Date,
    Time,
    DateTime,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "STRING",
            FieldType::Bytes => "BYTES",
            FieldType::Integer => "INTEGER",
            FieldType::Float => "FLOAT",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Timestamp => "TIMESTAMP",
            FieldType::Date => "DATE",
            FieldType::Time => "TIME",
            FieldType::DateTime => "DATETIME",
        };

        f.write_str(name)
    }
}

/// Name and declared type of a single result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    /// The name of the column, unique within its [`Schema`]
    pub name: String,
    /// The declared type of the column
    pub typ: FieldType,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, typ: FieldType) -> FieldSchema {
        Self {
            name: name.into(),
            typ,
        }
    }
}

/// Ordered column definitions of a result set.
///
/// Column order defines how a flat sequence of values is sliced into rows: the
/// `i`-th value of every row belongs to the `i`-th field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    /// Builds a schema, rejecting duplicate column names.
    pub fn new(fields: Vec<FieldSchema>) -> RowMapResult<Schema> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                bail!(
                    ErrorKind::DuplicateField,
                    "A column name appears more than once in the schema",
                    field.name
                );
            }
        }

        Ok(Self { fields })
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter()
    }
}

impl TryFrom<Vec<FieldSchema>> for Schema {
    type Error = crate::error::RowMapError;

    fn try_from(fields: Vec<FieldSchema>) -> Result<Self, Self::Error> {
        Schema::new(fields)
    }
}

/// A [`Schema`] together with the name to position mapping derived from it.
///
/// One index is built per accumulation pass and shared by every row of that
/// pass, so rows always resolve names against the schema they were built with.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldIndex {
    schema: Schema,
    positions: HashMap<String, usize>,
}

impl FieldIndex {
    pub fn new(schema: Schema) -> FieldIndex {
        let positions = schema
            .iter()
            .enumerate()
            .map(|(position, field)| (field.name.clone(), position))
            .collect();

        Self { schema, positions }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the position of `name` within the schema.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Returns the definition of the column called `name`.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.position(name).map(|position| &self.schema.fields[position])
    }
}
