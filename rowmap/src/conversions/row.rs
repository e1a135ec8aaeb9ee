use std::collections::HashMap;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::bail;
use crate::conversions::Value;
use crate::conversions::from_value::FromValue;
use crate::error::{ErrorKind, RowMapResult};
use crate::schema::{FieldIndex, Schema};

/// A reconstructed result row: one value per column of its schema, addressed by name.
///
/// Values are kept in schema order and looked up through the [`FieldIndex`] of the
/// pass that produced the row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    index: Arc<FieldIndex>,
    values: Vec<Value>,
}

impl Row {
    /// Builds a row from values in schema order.
    pub fn new(index: Arc<FieldIndex>, values: Vec<Value>) -> RowMapResult<Row> {
        let width = index.schema().len();
        if values.len() != width {
            bail!(
                ErrorKind::MalformedBatch,
                "The number of values does not match the number of columns",
                format!("{} values for {width} columns", values.len())
            );
        }

        Ok(Self::new_unchecked(index, values))
    }

    /// Builds a row whose width the caller has already checked.
    pub(crate) fn new_unchecked(index: Arc<FieldIndex>, values: Vec<Value>) -> Row {
        debug_assert_eq!(index.schema().len(), values.len());

        Self { index, values }
    }

    pub fn schema(&self) -> &Schema {
        self.index.schema()
    }

    /// Returns the number of fields, always equal to the schema's column count.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the raw value of the field called `name`.
    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.index
            .position(name)
            .map(|position| &self.values[position])
    }

    /// Iterates over `(name, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema()
            .iter()
            .map(|field| field.name.as_str())
            .zip(self.values.iter())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.schema().iter().map(|field| field.name.as_str())
    }

    /// Reads the field called `name` as `T`.
    ///
    /// Fails with [`ErrorKind::UnknownField`] if the schema has no such column,
    /// [`ErrorKind::FieldTypeMismatch`] if the column is declared with another type
    /// than `T` reads, and [`ErrorKind::ConversionError`] if the stored value does not
    /// fit the declared type. A null value yields `Ok(None)`.
    pub fn try_get<T>(&self, name: &str) -> RowMapResult<Option<T>>
    where
        T: FromValue,
    {
        let Some(position) = self.index.position(name) else {
            bail!(
                ErrorKind::UnknownField,
                "The field is not part of the row's schema",
                name
            );
        };

        let declared = self.schema().fields()[position].typ;
        if declared != T::FIELD_TYPE {
            bail!(
                ErrorKind::FieldTypeMismatch,
                "The field is declared with a different type than requested",
                format!(
                    "field `{name}` is declared as {declared} but was read as {}",
                    T::FIELD_TYPE
                )
            );
        }

        let value = &self.values[position];
        if value.is_null() {
            return Ok(None);
        }

        match T::from_value(value) {
            Some(converted) => Ok(Some(converted)),
            None => bail!(
                ErrorKind::ConversionError,
                "The stored value does not fit the field's declared type",
                format!(
                    "field `{name}` is declared as {declared} but holds a {} value",
                    value.kind_name()
                )
            ),
        }
    }

    /// Reads the field called `name` as `T`, returning [`None`] for a null value.
    ///
    /// # Panics
    ///
    /// Panics if the field does not exist, is declared with another type than `T`,
    /// or holds a value that does not fit its declared type. These are mismatches
    /// between the caller's expectations and the schema, see [`Row::try_get`] for
    /// the non-panicking variant.
    pub fn get<T>(&self, name: &str) -> Option<T>
    where
        T: FromValue,
    {
        match self.try_get(name) {
            Ok(value) => value,
            Err(err) => panic!("field type mismatch: {err}"),
        }
    }

    /// Consumes the row into a name to value map.
    pub fn into_map(self) -> HashMap<String, Value> {
        let names = self.index.schema().iter().map(|field| field.name.clone());

        names.zip(self.values).collect()
    }
}

/// Rows serialize as a map from column name to value, in column order.
impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
