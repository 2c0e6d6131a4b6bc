//! Core library surface for the Library Manager.
//!
//! `db` owns the SQLite store and every query against it; `ui` is the menu
//! shell that drives those queries. The binary only wires the two together.
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod ui;

pub use config::Config;
pub use db::{
    count_books, delete_book, find_book, insert_book, list_books, loan_book, return_book,
    search_books, set_status, StatusChange, Store,
};
pub use error::{LibraryError, Result};
pub use models::{Book, BookStatus};
pub use ui::{run_shell, Shell};
