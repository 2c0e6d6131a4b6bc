//! Interactive text front end: a numbered menu read from stdin, results and
//! tagged status lines written to stdout.

mod app;
mod forms;
mod helpers;
mod menu;
mod terminal;

pub use app::Shell;
pub use terminal::run_shell;
