//! Error taxonomy shared by the storage layer and the shell.
//!
//! "Book not found" is deliberately absent: a missing id is an ordinary
//! outcome of loan/return/delete and is modelled by return values instead.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the persistence layer.
pub type Result<T> = std::result::Result<T, LibraryError>;

#[derive(Debug, Error)]
pub enum LibraryError {
    /// The backing file could not be opened or the schema could not be created.
    /// Fatal at startup.
    #[error("could not open library database '{}': {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// An insert hit the `UNIQUE` constraint on `books.isbn`.
    #[error("A book with ISBN {0} already exists.")]
    DuplicateIsbn(String),

    /// Any other read or write failure.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// The store was used after `shutdown`.
    #[error("the library database is closed")]
    Closed,

    /// Rejected user input. Never reaches the database.
    #[error("{0}")]
    Validation(String),
}

/// Build a `map_err` adapter that tags a rusqlite failure with a short
/// description of what was being attempted.
pub(crate) fn storage(context: &'static str) -> impl FnOnce(rusqlite::Error) -> LibraryError {
    move |source| LibraryError::Storage { context, source }
}
