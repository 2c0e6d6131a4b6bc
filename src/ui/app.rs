use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::db::{
    delete_book, insert_book, list_books, loan_book, return_book, search_books, StatusChange,
};
use crate::error::LibraryError;
use crate::models::{Book, BookStatus};

use super::forms::{is_confirmation, parse_book_id, parse_search_term, BookForm};
use super::helpers::render_books_table;
use super::menu::MenuChoice;
use super::terminal::{write_status, StatusKind};

const MENU_RULE_WIDTH: usize = 40;

/// Line-oriented front end over an open library database.
///
/// Input and output are generic so tests can script a session with an
/// in-memory reader and capture what the user would have seen.
pub struct Shell<'a, R, W> {
    conn: &'a Connection,
    input: R,
    output: W,
    color: bool,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(conn: &'a Connection, input: R, output: W) -> Self {
        Self {
            conn,
            input,
            output,
            color: false,
        }
    }

    /// Colour the status tags. Only worth enabling on a real terminal.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Show the menu and dispatch choices until the user picks Exit or the
    /// input runs dry. Only I/O failures on the shell's own streams end the
    /// loop with an error; storage problems are reported and the loop goes on.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.show_menu()?;
            let Some(answer) = self.prompt("Enter your choice (1-7): ")? else {
                return self.say_goodbye();
            };

            match MenuChoice::parse(&answer) {
                Some(MenuChoice::AddBook) => self.add_book()?,
                Some(MenuChoice::ViewBooks) => self.view_books()?,
                Some(MenuChoice::LoanBook) => self.loan_book()?,
                Some(MenuChoice::ReturnBook) => self.return_book()?,
                Some(MenuChoice::DeleteBook) => self.delete_book()?,
                Some(MenuChoice::SearchBook) => self.search_books()?,
                Some(MenuChoice::Exit) => return self.say_goodbye(),
                None => self.status(
                    StatusKind::Alert,
                    "Invalid choice. Please enter a number between 1 and 7.",
                )?,
            }
        }
    }

    /// Print an untagged informational line.
    pub fn notice(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}").context("failed to write to terminal")
    }

    fn show_menu(&mut self) -> Result<()> {
        let heavy = "=".repeat(MENU_RULE_WIDTH);
        writeln!(self.output, "\n{heavy}")?;
        writeln!(self.output, "  Library Management System")?;
        writeln!(self.output, "{heavy}")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice.label())?;
        }
        writeln!(self.output, "{}", "-".repeat(MENU_RULE_WIDTH))?;
        Ok(())
    }

    fn add_book(&mut self) -> Result<()> {
        self.heading("Add New Book")?;
        let mut form = BookForm::default();
        for (label, field) in [
            ("Enter Title: ", &mut form.title),
            ("Enter Author: ", &mut form.author),
            ("Enter ISBN (Unique ID): ", &mut form.isbn),
        ] {
            match self.prompt(label)? {
                Some(answer) => *field = answer,
                None => return Ok(()),
            }
        }

        let book = match form.parse_inputs() {
            Ok(book) => book,
            Err(err) => return self.status(StatusKind::Alert, &err.to_string()),
        };

        match insert_book(self.conn, &book.title, &book.author, &book.isbn) {
            Ok(inserted) => self.status(
                StatusKind::Success,
                &format!(
                    "Book '{}' added successfully (ID {}).",
                    inserted.title, inserted.id
                ),
            ),
            Err(err) => self.report(&err),
        }
    }

    fn view_books(&mut self) -> Result<()> {
        match list_books(self.conn) {
            Ok(books) => self.show_books("Current Inventory", &books),
            Err(err) => self.report(&err),
        }
    }

    fn search_books(&mut self) -> Result<()> {
        self.heading("Search Book")?;
        let Some(answer) = self.prompt("Enter search term (Title, Author, or ISBN): ")? else {
            return Ok(());
        };

        let term = match parse_search_term(&answer) {
            Ok(term) => term,
            Err(err) => return self.status(StatusKind::Alert, &err.to_string()),
        };

        match search_books(self.conn, &term) {
            Ok(books) => self.show_books(&format!("Search Results for '{term}'"), &books),
            Err(err) => self.report(&err),
        }
    }

    fn loan_book(&mut self) -> Result<()> {
        self.heading("Loan Book")?;
        let Some(id) = self.prompt_book_id("Enter the ID of the book to loan: ")? else {
            return Ok(());
        };

        match loan_book(self.conn, id) {
            Ok(change) => self.show_status_change(id, "Loan", change),
            Err(err) => self.report(&err),
        }
    }

    fn return_book(&mut self) -> Result<()> {
        self.heading("Return Book")?;
        let Some(id) = self.prompt_book_id("Enter the ID of the book to return: ")? else {
            return Ok(());
        };

        match return_book(self.conn, id) {
            Ok(change) => self.show_status_change(id, "Return", change),
            Err(err) => self.report(&err),
        }
    }

    fn delete_book(&mut self) -> Result<()> {
        self.heading("Delete Book")?;
        let Some(id) = self.prompt_book_id("Enter the ID of the book to delete: ")? else {
            return Ok(());
        };

        let answer = self
            .prompt(&format!(
                "Are you sure you want to delete Book ID {id}? (yes/no): "
            ))?
            .unwrap_or_default();
        if !is_confirmation(&answer) {
            return self.status(StatusKind::Info, "Deletion cancelled.");
        }

        match delete_book(self.conn, id) {
            Ok(true) => self.status(
                StatusKind::Success,
                &format!("Book ID {id} deleted successfully."),
            ),
            Ok(false) => self.status(StatusKind::Failure, &format!("Book ID {id} not found.")),
            Err(err) => self.report(&err),
        }
    }

    fn show_status_change(&mut self, id: i64, action: &str, change: StatusChange) -> Result<()> {
        match change {
            StatusChange::Changed { status, .. } => self.status(
                StatusKind::Success,
                &format!("Book ID {id} status updated to '{status}'."),
            ),
            StatusChange::AlreadyInState { title, status } => self.status(
                StatusKind::Failure,
                &format!("'{title}' (ID {id}) is already {}.", describe(status)),
            ),
            StatusChange::NotFound => self.status(
                StatusKind::Failure,
                &format!("{action} failed: Book ID {id} not found."),
            ),
        }
    }

    fn show_books(&mut self, caption: &str, books: &[Book]) -> Result<()> {
        self.heading(caption)?;
        if books.is_empty() {
            return self.status(StatusKind::Info, "No books found matching the criteria.");
        }
        for line in render_books_table(books) {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    /// Keep asking until the answer is a positive id. A blank answer or end of
    /// input cancels.
    fn prompt_book_id(&mut self, message: &str) -> Result<Option<i64>> {
        loop {
            let Some(answer) = self.prompt(message)? else {
                return Ok(None);
            };
            match parse_book_id(&answer) {
                Ok(Some(id)) => return Ok(Some(id)),
                Ok(None) => {
                    self.status(StatusKind::Info, "No ID entered. Returning to menu.")?;
                    return Ok(None);
                }
                Err(err) => self.status(StatusKind::Alert, &err.to_string())?,
            }
        }
    }

    /// Print `message` and read one line. `None` means the input is closed.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn heading(&mut self, caption: &str) -> Result<()> {
        writeln!(self.output, "\n--- {caption} ---").context("failed to write to terminal")
    }

    fn status(&mut self, kind: StatusKind, message: &str) -> Result<()> {
        write_status(&mut self.output, kind, message, self.color)
            .context("failed to write to terminal")
    }

    fn report(&mut self, err: &LibraryError) -> Result<()> {
        tracing::warn!(error = %err, "library operation failed");
        self.status(StatusKind::Error, &err.to_string())
    }

    fn say_goodbye(&mut self) -> Result<()> {
        self.status(
            StatusKind::Info,
            "Exiting Library Management System. Goodbye!",
        )
    }
}

fn describe(status: BookStatus) -> &'static str {
    match status {
        BookStatus::Available => "available",
        BookStatus::Loaned => "loaned",
    }
}
