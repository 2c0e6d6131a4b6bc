//! Plain-text layout helpers for the shell's book tables.

use crate::models::Book;

const ID_WIDTH: usize = 4;
const TITLE_WIDTH: usize = 30;
const AUTHOR_WIDTH: usize = 20;
const ISBN_WIDTH: usize = 15;
const STATUS_WIDTH: usize = 10;

/// Pad `value` to exactly `width` characters, cutting it short with an
/// ellipsis when it does not fit.
pub(crate) fn fit_column(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return format!("{value:<width$}");
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Pad `value` to at least `width` characters without ever shortening it.
/// Used for the ID and ISBN columns, whose values the user types back in.
pub(crate) fn pad_column(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

fn table_row(id: &str, title: &str, author: &str, isbn: &str, status: &str) -> String {
    let row = format!(
        "{} | {} | {} | {} | {}",
        pad_column(id, ID_WIDTH),
        fit_column(title, TITLE_WIDTH),
        fit_column(author, AUTHOR_WIDTH),
        pad_column(isbn, ISBN_WIDTH),
        fit_column(status, STATUS_WIDTH),
    );
    row.trim_end().to_string()
}

/// Lay out books as a fixed-width table: header, rule, one line per book, rule.
pub(crate) fn render_books_table(books: &[Book]) -> Vec<String> {
    let header = table_row("ID", "Title", "Author", "ISBN", "Status");
    let rule = "-".repeat(ID_WIDTH + TITLE_WIDTH + AUTHOR_WIDTH + ISBN_WIDTH + STATUS_WIDTH + 12);

    let mut lines = Vec::with_capacity(books.len() + 3);
    lines.push(header);
    lines.push(rule.clone());
    for book in books {
        lines.push(table_row(
            &book.id.to_string(),
            &book.title,
            &book.author,
            &book.isbn,
            book.status.as_str(),
        ));
    }
    lines.push(rule);
    lines
}
