use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;

use crate::db::Store;

use super::app::Shell;

/// Severity tags printed in front of shell messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Success,
    Failure,
    Error,
    Alert,
    Info,
}

impl StatusKind {
    fn tag(self) -> &'static str {
        match self {
            StatusKind::Success => "[SUCCESS]",
            StatusKind::Failure => "[FAILURE]",
            StatusKind::Error => "[ERROR]",
            StatusKind::Alert => "[ALERT]",
            StatusKind::Info => "[INFO]",
        }
    }

    fn color(self) -> Color {
        match self {
            StatusKind::Success => Color::Green,
            StatusKind::Failure => Color::Yellow,
            StatusKind::Error => Color::Red,
            StatusKind::Alert => Color::Magenta,
            StatusKind::Info => Color::Cyan,
        }
    }
}

/// Write one tagged message preceded by a blank line. The tag is coloured only
/// when `color` is set, so piped output stays plain.
pub(crate) fn write_status(
    out: &mut impl Write,
    kind: StatusKind,
    message: &str,
    color: bool,
) -> io::Result<()> {
    if color {
        writeln!(out, "\n{} {message}", kind.tag().with(kind.color()).bold())
    } else {
        writeln!(out, "\n{} {message}", kind.tag())
    }
}

/// Run the interactive menu on the process's stdin/stdout until the user
/// exits or input ends.
pub fn run_shell(store: &Store) -> Result<()> {
    let conn = store.connection()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let color = stdout.is_tty();

    let mut shell = Shell::new(conn, stdin.lock(), stdout.lock()).with_color(color);
    if store.created() {
        shell.notice(&format!(
            "Database '{}' created successfully.",
            store.path().display()
        ))?;
    }
    shell.notice("[DB Ready] Table 'books' checked/created.")?;
    shell.run().context("interactive shell failed")
}
