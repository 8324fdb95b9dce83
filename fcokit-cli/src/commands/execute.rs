//! Command dispatch

use super::{Commands, Context, DatabaseCommands, FcoCommands, FteCommands};
use super::{database, fco, fte};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, context: &mut Context) -> anyhow::Result<()> {
        match self {
            Commands::Fco { command } => command.execute(context),
            Commands::Fte { command } => command.execute(context),
            Commands::Database { command } => command.execute(context),
        }
    }
}

impl FcoCommands {
    /// Execute the selected subtitle database command.
    ///
    /// # Errors
    /// Returns an error if the database or document cannot be loaded or saved.
    pub fn execute(&self, context: &mut Context) -> anyhow::Result<()> {
        match self {
            FcoCommands::Dump { path, json } => fco::dump(context, path, *json),
            FcoCommands::Search { path, query, limit } => fco::search(context, path, query, *limit),
            FcoCommands::Validate { text } => fco::validate(context, text),
            FcoCommands::SetText {
                path,
                group,
                subtitle,
                text,
                output,
            } => fco::set_text(context, path, *group, *subtitle, text, output.as_deref()),
            FcoCommands::AddGroup { path, name } => fco::add_group(context, path, name.as_deref()),
            FcoCommands::DeleteGroup { path, group } => fco::delete_group(context, path, *group),
            FcoCommands::Resave { path, output } => fco::resave(context, path, output.as_deref()),
        }
    }
}

impl FteCommands {
    /// Execute the selected font atlas command.
    ///
    /// # Errors
    /// Returns an error if the atlas cannot be read or written.
    pub fn execute(&self, context: &mut Context) -> anyhow::Result<()> {
        match self {
            FteCommands::Info { path } => fte::info(context, path),
            FteCommands::Characters { path } => fte::characters(context, path),
            FteCommands::Rewrite { path, output } => fte::rewrite(context, path, output),
        }
    }
}

impl DatabaseCommands {
    /// Execute the selected symbol table command.
    ///
    /// # Errors
    /// Returns an error if the input cannot be read or the output written.
    pub fn execute(&self, context: &mut Context) -> anyhow::Result<()> {
        match self {
            DatabaseCommands::Generate {
                characters,
                from_fte,
                output,
            } => database::generate(characters.as_deref(), from_fte.as_deref(), output),
            DatabaseCommands::Lookup { symbol } => database::lookup(context, symbol),
        }
    }
}
