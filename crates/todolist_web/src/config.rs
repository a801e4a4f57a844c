//! Startup configuration for the web binary.
//!
//! # Responsibility
//! - Parse the command line and select the storage backend once at
//!   startup; everything after this module is polymorphic over
//!   `TodoStore`.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Todo list web application.
#[derive(Debug, Parser)]
#[command(name = "todolist_web", version)]
pub struct Cli {
    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Storage backend for todo lists.
    #[arg(long, value_enum, default_value_t = Backend::Sqlite)]
    pub backend: Backend,

    /// SQLite database file (sqlite backend only).
    #[arg(long, default_value = "todos.sqlite3")]
    pub db_path: PathBuf,

    /// Log level; defaults to the build-mode default.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory for rolling log files.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Relational store in a SQLite database file.
    Sqlite,
    /// In-process store kept in each user's session.
    Session,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Session => "session",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Backend, Cli};
    use clap::Parser;

    #[test]
    fn defaults_select_sqlite_on_8080() {
        let cli = Cli::parse_from(["todolist_web"]);
        assert_eq!(cli.port, 8080);
        assert_eq!(cli.backend, Backend::Sqlite);
    }

    #[test]
    fn session_backend_is_selectable() {
        let cli = Cli::parse_from(["todolist_web", "--backend", "session", "--port", "3000"]);
        assert_eq!(cli.backend, Backend::Session);
        assert_eq!(cli.port, 3000);
    }
}
