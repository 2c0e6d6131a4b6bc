//! Persistence module split across logical submodules.

mod books;
mod connection;

pub use books::{
    count_books, delete_book, find_book, insert_book, list_books, loan_book, return_book,
    search_books, set_status, StatusChange,
};
pub use connection::Store;
