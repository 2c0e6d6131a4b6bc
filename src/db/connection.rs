use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::{LibraryError, Result};

/// Schema for the only table. `AUTOINCREMENT` keeps ids from being reused
/// after deletes.
const CREATE_BOOKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    isbn TEXT UNIQUE NOT NULL,
    status TEXT NOT NULL DEFAULT 'Available'
)";

/// Owner of the SQLite connection for the lifetime of the process.
///
/// Open it once at startup, hand `connection()` to whoever needs to query, and
/// call `shutdown` on the way out. `Drop` closes a connection that was never
/// shut down explicitly, which only happens while unwinding.
pub struct Store {
    conn: Option<Connection>,
    path: PathBuf,
    created: bool,
}

impl Store {
    /// Open (or create) the database at `path` and make sure the `books` table
    /// exists. Existing rows are never touched.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let existed = path.exists();

        let unavailable = |source| LibraryError::StorageUnavailable {
            path: path.clone(),
            source,
        };
        let conn = Connection::open(&path).map_err(unavailable)?;
        ensure_schema(&conn).map_err(unavailable)?;

        tracing::info!(path = %path.display(), created = !existed, "library database ready");
        Ok(Self {
            conn: Some(conn),
            path,
            created: !existed,
        })
    }

    /// Private in-memory database, mostly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let path = PathBuf::from(":memory:");
        let unavailable = |source| LibraryError::StorageUnavailable {
            path: path.clone(),
            source,
        };
        let conn = Connection::open_in_memory().map_err(unavailable)?;
        ensure_schema(&conn).map_err(unavailable)?;

        Ok(Self {
            conn: Some(conn),
            path,
            created: true,
        })
    }

    /// Borrow the live connection, or `Closed` after `shutdown`.
    pub fn connection(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(LibraryError::Closed)
    }

    /// Location the store was opened from, echoed back in the startup notice.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `open` had to create the database file.
    pub fn created(&self) -> bool {
        self.created
    }

    /// Close the connection. Calling it again is a no-op.
    pub fn shutdown(&mut self) -> Result<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        tracing::info!(path = %self.path.display(), "closing library database");
        conn.close().map_err(|(_, source)| LibraryError::Storage {
            context: "failed to close database",
            source,
        })
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            tracing::warn!(error = %err, "library database did not close cleanly");
        }
    }
}

fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(CREATE_BOOKS_TABLE, [])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_is_idempotent() {
        let mut store = Store::open_in_memory().unwrap();
        store.shutdown().unwrap();
        store.shutdown().unwrap();
        assert!(matches!(store.connection(), Err(LibraryError::Closed)));
    }

    #[test]
    fn reopening_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.db");

        let mut first = Store::open(&path).unwrap();
        assert!(first.created());
        first
            .connection()
            .unwrap()
            .execute(
                "INSERT INTO books (title, author, isbn) VALUES ('Dune', 'Herbert', 'ISBN1')",
                [],
            )
            .unwrap();
        first.shutdown().unwrap();

        let second = Store::open(&path).unwrap();
        assert!(!second.created());
        let count: i64 = second
            .connection()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn missing_parent_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("library.db");

        let err = Store::open(&path).err().unwrap();
        assert!(matches!(err, LibraryError::StorageUnavailable { .. }));
    }

    #[test]
    fn non_database_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.db");
        std::fs::write(&path, vec![b'x'; 4096]).unwrap();

        let err = Store::open(&path).err().unwrap();
        assert!(matches!(err, LibraryError::StorageUnavailable { .. }));
    }
}
