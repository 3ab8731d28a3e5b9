//! Filter expressions over a single dataset table.
//!
//! Table and column names are `'static` constants declared by the entity
//! modules; only bound parameters carry caller data.

use std::fmt;

use chrono::NaiveDate;
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::ToSql;

use crate::identifiers::Identifier;
use crate::models::codec::{date_to_int, ServiceTime};

/// A table in the dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Table(&'static str);

impl Table {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A column of some [`Table`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Column(&'static str);

impl Column {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A value bound into a filter predicate.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Real(f64),
}

impl ToSql for FilterValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Self::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            Self::Real(r) => ToSqlOutput::Owned(Value::Real(*r)),
        })
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<E> From<Identifier<E>> for FilterValue {
    fn from(id: Identifier<E>) -> Self {
        Self::Text(id.as_str().to_owned())
    }
}

impl<E> From<&Identifier<E>> for FilterValue {
    fn from(id: &Identifier<E>) -> Self {
        Self::Text(id.as_str().to_owned())
    }
}

impl From<i64> for FilterValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for FilterValue {
    fn from(i: i32) -> Self {
        Self::Integer(i.into())
    }
}

impl From<u32> for FilterValue {
    fn from(i: u32) -> Self {
        Self::Integer(i.into())
    }
}

impl From<f64> for FilterValue {
    fn from(r: f64) -> Self {
        Self::Real(r)
    }
}

/// Dates are stored as 8-digit integers (`YYYYMMDD`).
impl From<NaiveDate> for FilterValue {
    fn from(date: NaiveDate) -> Self {
        Self::Integer(date_to_int(date))
    }
}

impl From<ServiceTime> for FilterValue {
    fn from(time: ServiceTime) -> Self {
        Self::Text(time.to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Predicate {
    Eq(Column, FilterValue),
    IsNull(Column),
    IsAbsent(Column),
}

/// Conjunction of predicates over one table.
///
/// An empty filter matches the whole table.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    table: Table,
    projection: &'static [Column],
    predicates: Vec<Predicate>,
}

impl Filter {
    /// Match every row of `table`, selecting every column.
    pub fn table(table: Table) -> Self {
        Self {
            table,
            projection: &[],
            predicates: Vec::new(),
        }
    }

    /// Restrict the selected columns. An empty slice selects all of them.
    pub fn select(mut self, columns: &'static [Column]) -> Self {
        self.projection = columns;
        self
    }

    /// AND `column == value`.
    pub fn eq(mut self, column: Column, value: impl Into<FilterValue>) -> Self {
        self.predicates.push(Predicate::Eq(column, value.into()));
        self
    }

    /// AND `column == value` only when a value is supplied.
    ///
    /// `None` leaves the column unconstrained; it does not mean `IS NULL`.
    pub fn eq_opt<V: Into<FilterValue>>(self, column: Column, value: Option<V>) -> Self {
        match value {
            Some(value) => self.eq(column, value),
            None => self,
        }
    }

    /// AND `column IS NULL`.
    pub fn is_null(mut self, column: Column) -> Self {
        self.predicates.push(Predicate::IsNull(column));
        self
    }

    /// AND `column` holds no value: NULL or empty text, the same values the
    /// optional [`Fields`](crate::database::Fields) accessors decode as `None`.
    pub fn is_absent(mut self, column: Column) -> Self {
        self.predicates.push(Predicate::IsAbsent(column));
        self
    }

    pub fn source(&self) -> Table {
        self.table
    }

    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    /// Render as a parameterised `SELECT`.
    pub(crate) fn to_sql(&self, limit: Option<usize>) -> String {
        let mut sql = String::from("SELECT ");

        if self.projection.is_empty() {
            sql.push('*');
        } else {
            let columns: Vec<String> = self
                .projection
                .iter()
                .map(|c| format!("\"{}\"", c.name()))
                .collect();
            sql.push_str(&columns.join(", "));
        }

        sql.push_str(&format!(" FROM \"{}\"", self.table.name()));

        let mut param = 0;
        for (i, predicate) in self.predicates.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            match predicate {
                Predicate::Eq(column, _) => {
                    param += 1;
                    sql.push_str(&format!("\"{}\" = ?{param}", column.name()));
                }
                Predicate::IsNull(column) => {
                    sql.push_str(&format!("\"{}\" IS NULL", column.name()));
                }
                Predicate::IsAbsent(column) => {
                    let name = column.name();
                    sql.push_str(&format!("(\"{name}\" IS NULL OR \"{name}\" = '')"));
                }
            }
        }

        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        sql
    }

    /// Bound values, in the order of their `?N` placeholders.
    pub(crate) fn params(&self) -> impl Iterator<Item = &FilterValue> {
        self.predicates.iter().filter_map(|p| match p {
            Predicate::Eq(_, value) => Some(value),
            Predicate::IsNull(_) | Predicate::IsAbsent(_) => None,
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table)?;
        for (i, predicate) in self.predicates.iter().enumerate() {
            f.write_str(if i == 0 { " WHERE " } else { " AND " })?;
            match predicate {
                Predicate::Eq(column, value) => write!(f, "{column} = {value}")?,
                Predicate::IsNull(column) => write!(f, "{column} IS NULL")?,
                Predicate::IsAbsent(column) => write!(f, "{column} IS ABSENT")?,
            }
        }
        Ok(())
    }
}
