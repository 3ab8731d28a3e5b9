//! Owned dataset rows and typed column access.

use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::types::Value;

use crate::database::filter::Column;
use crate::error::{GtfsError, Result};
use crate::identifiers::Identifier;
use crate::models::codec::{self, ServiceTime};
use crate::models::types::GtfsCode;

/// One row read from the dataset.
///
/// Rows are copied out of the cursor so that decoding never borrows the
/// connection.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Record {
    /// Build a record from `(column, value)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let (columns, values): (Vec<String>, Vec<Value>) =
            pairs.into_iter().map(|(c, v)| (c.into(), v)).unzip();

        Self {
            columns: columns.into(),
            values,
        }
    }

    pub(crate) fn from_row(columns: &Arc<[String]>, row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        let values = (0..columns.len())
            .map(|i| row.get::<_, Value>(i))
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Self {
            columns: Arc::clone(columns),
            values,
        })
    }

    pub fn get(&self, column: Column) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column.name())
            .map(|i| &self.values[i])
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Copy of this record with one column replaced or added.
    pub fn with(&self, column: Column, value: Value) -> Self {
        let mut record = self.clone();
        match record.columns.iter().position(|c| c == column.name()) {
            Some(i) => record.values[i] = value,
            None => {
                let mut columns = record.columns.to_vec();
                columns.push(column.name().to_owned());
                record.columns = columns.into();
                record.values.push(value);
            }
        }
        record
    }
}

/// Typed view of a [`Record`] on behalf of one entity kind.
///
/// Every accessor fails with [`GtfsError::Decoding`] naming the entity and
/// the column. Required accessors reject NULL; `opt_*` accessors map NULL and
/// empty text to `None`.
pub struct Fields<'r> {
    entity: &'static str,
    record: &'r Record,
}

impl<'r> Fields<'r> {
    pub fn new(entity: &'static str, record: &'r Record) -> Self {
        Self { entity, record }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn record(&self) -> &'r Record {
        self.record
    }

    /// Decoding error for `column` of this entity.
    pub(crate) fn invalid(&self, column: Column, reason: impl Into<String>) -> GtfsError {
        GtfsError::Decoding {
            entity: self.entity,
            field: column.name(),
            reason: reason.into(),
        }
    }

    fn mismatch(&self, column: Column, expected: &str, found: &Value) -> GtfsError {
        let found = match found {
            Value::Null => "NULL",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
        };
        self.invalid(column, format!("expected {expected}, found {found}"))
    }

    fn value(&self, column: Column) -> Result<&'r Value> {
        self.record
            .get(column)
            .ok_or_else(|| self.invalid(column, "missing column"))
    }

    fn nullable(&self, column: Column) -> Result<Option<&'r Value>> {
        Ok(match self.value(column)? {
            Value::Null => None,
            Value::Text(s) if s.is_empty() => None,
            value => Some(value),
        })
    }

    fn text_of(&self, column: Column, value: &Value) -> Result<String> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            other => Err(self.mismatch(column, "text", other)),
        }
    }

    fn int_of(&self, column: Column, value: &Value) -> Result<i64> {
        match value {
            Value::Integer(i) => Ok(*i),
            other => Err(self.mismatch(column, "integer", other)),
        }
    }

    fn float_of(&self, column: Column, value: &Value) -> Result<f64> {
        match value {
            Value::Real(r) => Ok(*r),
            Value::Integer(i) => Ok(*i as f64),
            other => Err(self.mismatch(column, "real", other)),
        }
    }

    fn date_of(&self, column: Column, value: &Value) -> Result<NaiveDate> {
        let date = match value {
            Value::Integer(i) => codec::date_from_int(*i),
            Value::Text(s) => codec::parse_date(s),
            other => return Err(self.mismatch(column, "8-digit date", other)),
        };
        date.ok_or_else(|| self.invalid(column, "not a YYYYMMDD date"))
    }

    pub fn string(&self, column: Column) -> Result<String> {
        let value = self.value(column)?;
        self.text_of(column, value)
    }

    pub fn opt_string(&self, column: Column) -> Result<Option<String>> {
        self.nullable(column)?
            .map(|v| self.text_of(column, v))
            .transpose()
    }

    pub fn int(&self, column: Column) -> Result<i64> {
        let value = self.value(column)?;
        self.int_of(column, value)
    }

    pub fn opt_int(&self, column: Column) -> Result<Option<i64>> {
        self.nullable(column)?
            .map(|v| self.int_of(column, v))
            .transpose()
    }

    /// Non-negative integer, e.g. a sequence number.
    pub fn uint(&self, column: Column) -> Result<u32> {
        let raw = self.int(column)?;
        u32::try_from(raw).map_err(|_| self.invalid(column, format!("{raw} is out of range")))
    }

    pub fn float(&self, column: Column) -> Result<f64> {
        let value = self.value(column)?;
        self.float_of(column, value)
    }

    pub fn opt_float(&self, column: Column) -> Result<Option<f64>> {
        self.nullable(column)?
            .map(|v| self.float_of(column, v))
            .transpose()
    }

    pub fn id<E>(&self, column: Column) -> Result<Identifier<E>> {
        self.string(column).map(Identifier::new)
    }

    pub fn opt_id<E>(&self, column: Column) -> Result<Option<Identifier<E>>> {
        Ok(self.opt_string(column)?.map(Identifier::new))
    }

    /// Closed enumeration stored as an integer code. Unknown codes fail.
    pub fn code<T: GtfsCode>(&self, column: Column) -> Result<T> {
        let raw = self.int(column)?;
        T::from_code(raw).ok_or_else(|| self.invalid(column, format!("unknown {} code {raw}", T::NAME)))
    }

    pub fn date(&self, column: Column) -> Result<NaiveDate> {
        let value = self.value(column)?;
        self.date_of(column, value)
    }

    pub fn opt_date(&self, column: Column) -> Result<Option<NaiveDate>> {
        self.nullable(column)?
            .map(|v| self.date_of(column, v))
            .transpose()
    }

    pub fn time(&self, column: Column) -> Result<ServiceTime> {
        let raw = self.string(column)?;
        raw.parse()
            .map_err(|_| self.invalid(column, format!("`{raw}` is not HH:MM:SS")))
    }
}
