//! Input parsing for the shell. Everything here runs before the database is
//! touched, so a rejected value never produces a write.

use crate::error::{LibraryError, Result};

/// Raw answers collected by the "Add New Book" flow.
#[derive(Default, Clone, Debug)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) isbn: String,
}

/// Trimmed, non-empty values ready for `insert_book`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct NewBook {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) isbn: String,
}

impl BookForm {
    pub(crate) fn parse_inputs(&self) -> Result<NewBook> {
        let title = self.title.trim();
        let author = self.author.trim();
        let isbn = self.isbn.trim();

        if title.is_empty() || author.is_empty() || isbn.is_empty() {
            return Err(LibraryError::Validation(
                "All fields are required. Book not added.".to_string(),
            ));
        }

        Ok(NewBook {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
        })
    }
}

/// Parse an answer to "Enter the ID of the book ...". A blank line means the
/// user backed out and yields `Ok(None)`.
pub(crate) fn parse_book_id(input: &str) -> Result<Option<i64>> {
    let raw = input.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let id = raw.parse::<i64>().map_err(|_| {
        LibraryError::Validation("Invalid input. Please enter a valid numerical ID.".to_string())
    })?;

    if id > 0 {
        Ok(Some(id))
    } else {
        Err(LibraryError::Validation(
            "Book ID must be a positive number.".to_string(),
        ))
    }
}

/// Reject blank search terms before they turn into a match-everything
/// `LIKE '%%'` query.
pub(crate) fn parse_search_term(input: &str) -> Result<String> {
    let term = input.trim();
    if term.is_empty() {
        Err(LibraryError::Validation(
            "Search term cannot be empty.".to_string(),
        ))
    } else {
        Ok(term.to_string())
    }
}

/// Only an explicit "yes" (any case) confirms a delete.
pub(crate) fn is_confirmation(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("yes")
}
