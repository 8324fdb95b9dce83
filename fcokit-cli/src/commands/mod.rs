use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Subcommand;
use fcokit::config::FcoConfig;
use fcokit::formats::database::SymbolDatabase;

pub mod database;
pub mod definitions;
pub mod execute;
pub mod fco;
pub mod fte;

pub use definitions::{DatabaseCommands, FcoCommands, FteCommands};

#[derive(Subcommand)]
pub enum Commands {
    /// Subtitle database (.fco) operations
    Fco {
        #[command(subcommand)]
        command: FcoCommands,
    },

    /// Font atlas (.fte) operations
    Fte {
        #[command(subcommand)]
        command: FteCommands,
    },

    /// Symbol table (`fcoDatabase.txt`) operations
    Database {
        #[command(subcommand)]
        command: DatabaseCommands,
    },
}

/// Settings shared by every command.
pub struct Context {
    database_override: Option<PathBuf>,
    config: FcoConfig,
}

impl Context {
    pub fn new(database_override: Option<PathBuf>) -> Self {
        Self {
            database_override,
            config: FcoConfig::load(),
        }
    }

    /// Load the symbol database from the override or the configured path.
    pub fn database(&self) -> anyhow::Result<SymbolDatabase> {
        let path = self
            .config
            .resolve_database_path(self.database_override.as_deref());
        SymbolDatabase::load(&path).with_context(|| {
            format!(
                "symbol database {} is required, pass --database or generate one with `fcokit database generate`",
                path.display()
            )
        })
    }

    /// Remember a file the user worked on.
    pub fn remember_fco(&mut self, path: &Path) {
        self.config.add_recent_file(&path.to_string_lossy());
        self.config.last_fco_dir = path.parent().map(Path::to_path_buf);
        self.persist();
    }

    pub fn remember_fte(&mut self, path: &Path) {
        self.config.last_fte_dir = path.parent().map(Path::to_path_buf);
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.config.save() {
            tracing::warn!("Could not save settings: {err}");
        }
    }
}
