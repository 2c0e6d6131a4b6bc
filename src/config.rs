//! Runtime configuration. The only knob is where the SQLite file lives.

use std::path::{Path, PathBuf};

/// File name used when no other location is configured. Resolved relative to
/// the working directory, like the rest of the program's paths.
pub const DEFAULT_DB_PATH: &str = "library.db";

#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the SQLite database file. Created on first run.
    pub db_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

impl Config {
    /// Point the store at a different file.
    pub fn with_db_path(mut self, path: impl AsRef<Path>) -> Self {
        self.db_path = path.as_ref().to_path_buf();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_library_db_in_working_directory() {
        assert_eq!(Config::default().db_path, PathBuf::from("library.db"));
    }

    #[test]
    fn db_path_can_be_overridden() {
        let config = Config::default().with_db_path("/tmp/other.db");
        assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
    }
}
