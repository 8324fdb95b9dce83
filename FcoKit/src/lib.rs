//! # `FcoKit`
//!
//! Codecs for a game's localized subtitle and font assets.
//!
//! ## Supported Formats
//!
//! - **FCO** - Subtitle databases (groups, labelled subtitles, color blocks)
//! - **FTE** - Font atlas tables (textures and glyph UV rectangles)
//! - **`fcoDatabase.txt`** - The symbol table that maps text to encoded values
//!
//! ## Quick Start
//!
//! ### Editing a Subtitle File
//!
//! ```no_run
//! use fcokit::prelude::*;
//!
//! let database = SymbolDatabase::load("fcoDatabase.txt")?;
//! let mut document = FcoDocument::load("Subtitle.fco", &database)?;
//!
//! let text = validate_string("Press \\A\\ to continue", &database)?;
//! document.modify_subtitle(0, 0, text);
//! document.save("Subtitle.fco", &database)?;
//! # Ok::<(), fcokit::Error>(())
//! ```
//!
//! ### Reading a Font Atlas
//!
//! ```no_run
//! use fcokit::prelude::*;
//!
//! let atlas = FontAtlas::import("All.fte")?;
//! println!("{} characters", atlas.glyphs.len());
//!
//! // Regenerate the symbol table for this font
//! write_database("fcoDatabase.txt", &atlas.characters())?;
//! # Ok::<(), fcokit::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, Location, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::FcoConfig;
    pub use crate::error::{Error, Location, Result};
    pub use crate::formats::database::{Symbol, SymbolDatabase, generate_database_text, write_database};
    pub use crate::formats::fco::{
        Color, ColorBlock, Edit, FcoDocument, Rgb, Subgroup, Subtitle, tokenize, validate_string,
    };
    pub use crate::formats::fte::{FontAtlas, GlyphRecord, PixelRect, TextureRef};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
