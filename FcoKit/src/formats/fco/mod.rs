//! `.fco` subtitle database format
//!
//! Big-endian container of named subgroups, each holding labelled subtitles.
//! Subtitle text is stored as 32-bit values that are translated through a
//! [`SymbolDatabase`]. Every subtitle also carries a default color and a list
//! of color blocks that recolor a range of symbols.
//!
//! [`SymbolDatabase`]: crate::formats::database::SymbolDatabase

mod editor;
mod reader;
mod text;
mod writer;

pub use editor::Edit;
pub use reader::{parse_fco_bytes, read_fco};
pub use text::{tokenize, validate_string};
pub use writer::{serialize_fco, write_fco};

pub(crate) use writer::{EncodedSubgroup, EncodedSubtitle, serialize_encoded};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::formats::database::{Symbol, join_symbols};

/// Size of the fixed file header.
pub const HEADER_SIZE: u64 = 0x0C;

/// Size of the style record that follows every subtitle's text.
pub const STYLE_RECORD_SIZE: usize = 0x40;

/// Offset of the `a, r, g, b` default color inside the style record.
pub const DEFAULT_COLOR_OFFSET: usize = 0x0C;

/// Value that terminates a subtitle's text.
pub const TEXT_TERMINATOR: u32 = 0x0000_0004;

/// Constant stored between a color block's range and its color.
pub const COLOR_BLOCK_MARKER: u32 = 0x0000_0002;

/// Value that closes every subtitle record.
pub const SUBTITLE_TERMINATOR: u32 = 0x0000_0000;

/// Label given to new subgroups and unnamed subtitles.
pub const DEFAULT_NAME: &str = "NO_NAME";

/// Text given to new subtitles.
pub const DEFAULT_SUBTITLE_TEXT: &str = "DUMMY SUBTITLE";

/// RGB part of a [`Color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rgb {
    /// Use the engine's built-in color. Stored as `(0, 0, 0)`.
    Hardcoded,
    /// An explicit color. Never `(0, 0, 0)`, [`Color::rgba`] turns black into
    /// `(1, 0, 0)`.
    Explicit { r: u8, g: u8, b: u8 },
}

/// Subtitle or color block color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub a: u8,
    pub rgb: Rgb,
}

impl Color {
    /// Opaque engine default.
    #[must_use]
    pub const fn hardcoded() -> Self {
        Self {
            a: 0xFF,
            rgb: Rgb::Hardcoded,
        }
    }

    /// An explicit color. `(0, 0, 0)` would read back as the hardcoded
    /// sentinel, so it becomes `(1, 0, 0)`.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let rgb = if r == 0 && g == 0 && b == 0 {
            Rgb::Explicit { r: 1, g: 0, b: 0 }
        } else {
            Rgb::Explicit { r, g, b }
        };
        Self { a, rgb }
    }

    #[must_use]
    pub const fn white() -> Self {
        Self::rgba(0xFF, 0xFF, 0xFF, 0xFF)
    }

    /// The darkest color that is not the hardcoded sentinel.
    #[must_use]
    pub const fn black() -> Self {
        Self::rgba(0x00, 0x00, 0x00, 0xFF)
    }

    #[must_use]
    pub fn is_hardcoded(self) -> bool {
        self.rgb == Rgb::Hardcoded
    }

    pub fn set_hardcoded(&mut self) {
        self.rgb = Rgb::Hardcoded;
    }

    /// Decode the on-disk `a, r, g, b` bytes.
    #[must_use]
    pub fn from_argb([a, r, g, b]: [u8; 4]) -> Self {
        if r == 0 && g == 0 && b == 0 {
            Self {
                a,
                rgb: Rgb::Hardcoded,
            }
        } else {
            Self::rgba(r, g, b, a)
        }
    }

    /// Encode to the on-disk `a, r, g, b` bytes.
    #[must_use]
    pub fn to_argb(self) -> [u8; 4] {
        match self.rgb {
            Rgb::Hardcoded => [self.a, 0, 0, 0],
            Rgb::Explicit { r: 0, g: 0, b: 0 } => [self.a, 1, 0, 0],
            Rgb::Explicit { r, g, b } => [self.a, r, g, b],
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::hardcoded()
    }
}

/// A recolored, inclusive range of symbol indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorBlock {
    pub start: u32,
    pub end: u32,
    pub color: Color,
}

impl ColorBlock {
    #[must_use]
    pub fn new(start: u32, end: u32, color: Color) -> Self {
        Self { start, end, color }
    }

    /// Whether the range runs forwards, `start <= end`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// Whether `index` falls inside the block.
    #[must_use]
    pub fn contains(&self, index: u32) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

impl Default for ColorBlock {
    fn default() -> Self {
        Self::new(0, 1, Color::default())
    }
}

/// A labelled line of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtitle {
    pub label: String,
    /// Decoded text, one entry per encoded value.
    pub symbols: Vec<Symbol>,
    pub default_color: Color,
    pub color_blocks: Vec<ColorBlock>,
}

impl Subtitle {
    #[must_use]
    pub fn new(label: impl Into<String>, symbols: Vec<Symbol>) -> Self {
        Self {
            label: label.into(),
            symbols,
            default_color: Color::default(),
            color_blocks: Vec::new(),
        }
    }

    /// Number of encoded values, escape tokens count once.
    #[must_use]
    pub fn subtitle_size(&self) -> usize {
        self.symbols.len()
    }

    /// Text as the user edits it.
    #[must_use]
    pub fn text(&self) -> String {
        join_symbols(&self.symbols)
    }
}

/// A named list of subtitles.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Subgroup {
    pub name: String,
    pub subtitles: Vec<Subtitle>,
}

impl Subgroup {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subtitles: Vec::new(),
        }
    }
}

/// A whole `.fco` file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FcoDocument {
    pub group_name: String,
    pub subgroups: Vec<Subgroup>,
}

impl FcoDocument {
    #[must_use]
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            subgroups: Vec::new(),
        }
    }

    /// Drop every subgroup and the group name.
    pub fn reset(&mut self) {
        self.group_name.clear();
        self.subgroups.clear();
    }

    /// Total number of subtitles across all subgroups.
    #[must_use]
    pub fn subtitle_total(&self) -> usize {
        self.subgroups.iter().map(|g| g.subtitles.len()).sum()
    }
}

impl fmt::Display for FcoDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Group Name: {}", self.group_name)?;
        for subgroup in &self.subgroups {
            writeln!(f, "\tSub-group Name: {}", subgroup.name)?;
            for subtitle in &subgroup.subtitles {
                writeln!(f, "\t\tSubtitle Label: {}", subtitle.label)?;
                for line in subtitle.text().split('\n') {
                    writeln!(f, "\t\t\t{line}")?;
                }
                for block in &subtitle.color_blocks {
                    let [a, r, g, b] = block.color.to_argb();
                    writeln!(
                        f,
                        "\t\tColor Block: {} to {}, RGBA = [{r},{g},{b},{a}]",
                        block.start, block.end
                    )?;
                }
            }
        }
        Ok(())
    }
}
