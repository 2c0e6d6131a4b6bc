//! End-to-end checks against a file-backed library database.

use std::io::Cursor;

use library_manager::{
    count_books, delete_book, find_book, insert_book, list_books, loan_book, return_book,
    search_books, BookStatus, LibraryError, Shell, StatusChange, Store,
};

fn temp_store() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("library.db")).unwrap();
    (dir, store)
}

// =============================================================================
// Storage Gateway
// =============================================================================

#[test]
fn dune_lifecycle() {
    let (_dir, store) = temp_store();
    let conn = store.connection().unwrap();

    let dune = insert_book(conn, "Dune", "Herbert", "ISBN1").unwrap();
    assert_eq!(dune.id, 1);
    assert_eq!(dune.status, BookStatus::Available);

    let err = insert_book(conn, "Dune", "Herbert", "ISBN1").unwrap_err();
    assert!(matches!(err, LibraryError::DuplicateIsbn(_)));
    assert_eq!(count_books(conn).unwrap(), 1);

    assert!(matches!(loan_book(conn, 1).unwrap(), StatusChange::Changed { .. }));
    assert_eq!(find_book(conn, 1).unwrap().unwrap().status, BookStatus::Loaned);

    assert!(matches!(
        loan_book(conn, 1).unwrap(),
        StatusChange::AlreadyInState {
            status: BookStatus::Loaned,
            ..
        }
    ));
    assert_eq!(find_book(conn, 1).unwrap().unwrap().status, BookStatus::Loaned);

    assert!(matches!(return_book(conn, 1).unwrap(), StatusChange::Changed { .. }));
    assert_eq!(find_book(conn, 1).unwrap().unwrap().status, BookStatus::Available);

    assert!(delete_book(conn, 1).unwrap());
    assert_eq!(count_books(conn).unwrap(), 0);
    assert_eq!(loan_book(conn, 1).unwrap(), StatusChange::NotFound);
}

#[test]
fn listing_tracks_inserts_and_deletes() {
    let (_dir, store) = temp_store();
    let conn = store.connection().unwrap();

    let titles = ["Neuromancer", "Anathem", "Kindred", "Solaris", "Beloved"];
    let mut ids = Vec::new();
    for (n, title) in titles.iter().enumerate() {
        ids.push(insert_book(conn, title, "Someone", &format!("isbn-{n}")).unwrap().id);
    }
    delete_book(conn, ids[2]).unwrap();

    let listed: Vec<String> = list_books(conn).unwrap().into_iter().map(|b| b.title).collect();
    assert_eq!(listed, vec!["Anathem", "Beloved", "Neuromancer", "Solaris"]);
}

#[test]
fn search_mixes_substring_and_exact_isbn() {
    let (_dir, store) = temp_store();
    let conn = store.connection().unwrap();
    insert_book(conn, "Dune", "Frank Herbert", "0441013597").unwrap();
    insert_book(conn, "Hyperion", "Dan Simmons", "0553283685").unwrap();

    let by_author: Vec<String> = search_books(conn, "SIMMONS")
        .unwrap()
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(by_author, vec!["Hyperion"]);

    assert_eq!(search_books(conn, "0441013597").unwrap().len(), 1);
    assert!(search_books(conn, "0441").unwrap().is_empty());
}

#[test]
fn rows_survive_shutdown_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.db");

    let mut store = Store::open(&path).unwrap();
    insert_book(store.connection().unwrap(), "Dune", "Herbert", "ISBN1").unwrap();
    loan_book(store.connection().unwrap(), 1).unwrap();
    store.shutdown().unwrap();
    assert!(matches!(store.connection(), Err(LibraryError::Closed)));

    let store = Store::open(&path).unwrap();
    let books = list_books(store.connection().unwrap()).unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].status, BookStatus::Loaned);
}

// =============================================================================
// Interactive Shell
// =============================================================================

#[test]
fn scripted_session() {
    let (_dir, store) = temp_store();
    let script = [
        "1", "Dune", "Frank Herbert", "ISBN1", // add
        "1", "Emma", "Jane Austen", "ISBN2", // add
        "3", "1", // loan Dune
        "3", "1", // loan again
        "4", "2", // return Emma, never loaned
        "3", "99", // loan missing id
        "6", "austen", // search
        "2", // list
        "7",
    ]
    .join("\n");

    let conn = store.connection().unwrap();
    let mut shell = Shell::new(conn, Cursor::new(script), Vec::new());
    shell.run().unwrap();
    let output = String::from_utf8(shell.into_output()).unwrap();

    assert!(output.contains("[SUCCESS] Book ID 1 status updated to 'Loaned'."));
    assert!(output.contains("[FAILURE] 'Dune' (ID 1) is already loaned."));
    assert!(output.contains("[FAILURE] 'Emma' (ID 2) is already available."));
    assert!(output.contains("[FAILURE] Loan failed: Book ID 99 not found."));
    assert!(output.contains("--- Search Results for 'austen' ---"));
    assert!(output.contains("--- Current Inventory ---"));
    assert!(output.contains("| Loaned"));
    assert!(output.contains("Goodbye!"));
}
