//! File format handlers
//!
//! `common` holds the big-endian cursor shared by the two binary codecs.

pub mod common;
pub mod database;
pub mod fco;
pub mod fte;

// Re-export main document types
pub use database::{Symbol, SymbolDatabase};
pub use fco::{Color, ColorBlock, Edit, FcoDocument, Rgb, Subgroup, Subtitle, read_fco, write_fco};
pub use fte::{FontAtlas, GlyphRecord, PixelRect, TextureRef, read_fte, write_fte};
