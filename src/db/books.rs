use rusqlite::{ffi, params, Connection, Error as SqlError, OptionalExtension, Row};

use crate::error::{storage, LibraryError, Result};
use crate::models::{Book, BookStatus};

/// Outcome of a loan or return request. Only `Changed` touched the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// The book moved into the requested status.
    Changed { title: String, status: BookStatus },
    /// The book was already in the requested status.
    AlreadyInState { title: String, status: BookStatus },
    /// No row with that id.
    NotFound,
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        isbn: row.get(3)?,
        status: row.get(4)?,
    })
}

/// Insert a new book with status `Available` and return it with its id.
pub fn insert_book(conn: &Connection, title: &str, author: &str, isbn: &str) -> Result<Book> {
    conn.execute(
        "INSERT INTO books (title, author, isbn) VALUES (?1, ?2, ?3)",
        params![title, author, isbn],
    )
    .map_err(|err| map_unique_constraint(err, isbn))?;

    let id = conn.last_insert_rowid();
    tracing::debug!(id, isbn, "book inserted");
    Ok(Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        isbn: isbn.to_string(),
        status: BookStatus::Available,
    })
}

/// Every book, ordered by title using SQLite's default (case-sensitive)
/// collation.
pub fn list_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn
        .prepare("SELECT id, title, author, isbn, status FROM books ORDER BY title, id")
        .map_err(storage("failed to prepare book query"))?;

    let books = stmt
        .query_map([], book_from_row)
        .map_err(storage("failed to load books"))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(storage("failed to collect books"))?;

    Ok(books)
}

/// Books whose title or author contains `term` (ASCII case-insensitive, via
/// `LIKE`), or whose ISBN is exactly `term`. Wildcard characters typed by the
/// user are matched literally.
pub fn search_books(conn: &Connection, term: &str) -> Result<Vec<Book>> {
    let pattern = format!("%{}%", escape_like(term));

    let mut stmt = conn
        .prepare(
            "SELECT id, title, author, isbn, status FROM books
             WHERE title LIKE ?1 ESCAPE '\\'
                OR author LIKE ?1 ESCAPE '\\'
                OR isbn = ?2
             ORDER BY title, id",
        )
        .map_err(storage("failed to prepare search query"))?;

    let books = stmt
        .query_map(params![pattern, term], book_from_row)
        .map_err(storage("failed to search books"))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(storage("failed to collect search results"))?;

    Ok(books)
}

/// Fetch a single book by id. Loan and return use it to tell a missing row
/// apart from one that is already in the requested status.
pub fn find_book(conn: &Connection, id: i64) -> Result<Option<Book>> {
    conn.query_row(
        "SELECT id, title, author, isbn, status FROM books WHERE id = ?1",
        params![id],
        book_from_row,
    )
    .optional()
    .map_err(storage("failed to look up book"))
}

/// Number of rows in `books`. Handy for checking that a rejected insert left
/// the table untouched.
pub fn count_books(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
        .map_err(storage("failed to count books"))
}

/// Overwrite the status of one book. Returns `false` when the id does not
/// exist.
pub fn set_status(conn: &Connection, id: i64, status: BookStatus) -> Result<bool> {
    let updated = conn
        .execute(
            "UPDATE books SET status = ?1 WHERE id = ?2",
            params![status, id],
        )
        .map_err(storage("failed to update book status"))?;

    tracing::debug!(id, %status, updated, "book status update");
    Ok(updated > 0)
}

/// Mark a book as loaned if it is currently available.
pub fn loan_book(conn: &Connection, id: i64) -> Result<StatusChange> {
    transition(conn, id, BookStatus::Loaned)
}

/// Mark a book as available if it is currently loaned.
pub fn return_book(conn: &Connection, id: i64) -> Result<StatusChange> {
    transition(conn, id, BookStatus::Available)
}

// Read, then write. The program is the only writer of its database file, so
// nothing can change the row between the two statements.
fn transition(conn: &Connection, id: i64, target: BookStatus) -> Result<StatusChange> {
    let Some(book) = find_book(conn, id)? else {
        return Ok(StatusChange::NotFound);
    };

    if book.status == target {
        return Ok(StatusChange::AlreadyInState {
            title: book.title,
            status: target,
        });
    }

    if set_status(conn, id, target)? {
        Ok(StatusChange::Changed {
            title: book.title,
            status: target,
        })
    } else {
        Ok(StatusChange::NotFound)
    }
}

/// Permanently remove a book. Returns `false` when the id does not exist.
pub fn delete_book(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM books WHERE id = ?1", params![id])
        .map_err(storage("failed to delete book"))?;

    tracing::debug!(id, deleted, "book delete");
    Ok(deleted > 0)
}

/// Turn a `UNIQUE` violation on insert into `DuplicateIsbn`. The `NOT NULL`
/// constraints cannot fire because every column is bound.
fn map_unique_constraint(err: SqlError, isbn: &str) -> LibraryError {
    if let SqlError::SqliteFailure(code, _) = &err {
        if code.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE {
            return LibraryError::DuplicateIsbn(isbn.to_string());
        }
    }
    LibraryError::Storage {
        context: "failed to insert book",
        source: err,
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
