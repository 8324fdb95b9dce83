//! Subcommand enum definitions for CLI

use clap::{ArgGroup, Subcommand};
use std::path::PathBuf;

/// Subtitle database commands
#[derive(Subcommand)]
pub enum FcoCommands {
    /// Print the document tree
    Dump {
        /// FCO file
        path: PathBuf,

        /// Print JSON instead of the text tree
        #[arg(long)]
        json: bool,
    },

    /// Find subtitles containing a string
    Search {
        /// FCO file
        path: PathBuf,

        /// Text to look for, escape tokens included (e.g. "\A\")
        query: String,

        /// Maximum results to return
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Check that text can be encoded with the symbol database
    Validate {
        /// Subtitle text
        text: String,
    },

    /// Replace the text of one subtitle and save
    SetText {
        /// FCO file
        path: PathBuf,

        /// Subgroup index
        #[arg(short, long)]
        group: usize,

        /// Subtitle index within the subgroup
        #[arg(short, long)]
        subtitle: usize,

        /// New text
        text: String,

        /// Write to this file instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Append a `NO_NAME` subgroup and save
    AddGroup {
        /// FCO file
        path: PathBuf,

        /// Name for the new subgroup
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Remove a subgroup and save
    DeleteGroup {
        /// FCO file
        path: PathBuf,

        /// Subgroup index
        #[arg(short, long)]
        group: usize,
    },

    /// Load and save again, normalizing the file
    Resave {
        /// FCO file
        path: PathBuf,

        /// Write to this file instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Font atlas commands
#[derive(Subcommand)]
pub enum FteCommands {
    /// Show textures and glyph counts
    Info {
        /// FTE file
        path: PathBuf,
    },

    /// Print the characters of the font in atlas order
    Characters {
        /// FTE file
        path: PathBuf,
    },

    /// Load and export again, writing the glyph index next to the output
    Rewrite {
        /// FTE file
        path: PathBuf,

        /// Output FTE file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Symbol table commands
#[derive(Subcommand)]
pub enum DatabaseCommands {
    /// Generate `fcoDatabase.txt` for a font
    #[command(group(ArgGroup::new("source").required(true).args(["characters", "from_fte"])))]
    Generate {
        /// UTF-8 text file listing the font's characters in order
        #[arg(long)]
        characters: Option<PathBuf>,

        /// Read the character list from a font atlas
        #[arg(long)]
        from_fte: Option<PathBuf>,

        /// Output file
        #[arg(short, long, default_value = "fcoDatabase.txt")]
        output: PathBuf,
    },

    /// Show the encoded value of a symbol, or the symbol of a value (0x..)
    Lookup {
        /// Symbol such as "a" or "\Start\", or a hex value such as 0x82
        symbol: String,
    },
}
