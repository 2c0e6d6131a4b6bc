//! Domain models that mirror the `books` table. They stay plain data holders
//! so the storage layer and the shell can pass them around freely.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One catalog item. Rows are identified by `id`, books by `isbn`.
pub struct Book {
    /// Primary key assigned by SQLite on insert. Never reused.
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Natural key, unique across the table.
    pub isbn: String,
    pub status: BookStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Lending state of a book. Stored as text so the database stays readable with
/// the `sqlite3` shell.
pub enum BookStatus {
    #[default]
    Available,
    Loaned,
}

impl BookStatus {
    /// Text stored in the `status` column and shown in the status column of
    /// the book table.
    pub fn as_str(self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Loaned => "Loaned",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status is neither `Available` nor `Loaned`.
#[derive(Debug, Error)]
#[error("invalid book status '{0}'")]
pub struct ParseStatusError(String);

impl FromStr for BookStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(BookStatus::Available),
            "Loaned" => Ok(BookStatus::Loaned),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl ToSql for BookStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for BookStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|err| FromSqlError::Other(Box::new(err)))
    }
}
