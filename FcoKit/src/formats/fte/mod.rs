//! `.fte` font atlas format
//!
//! A list of textures followed by fixed-size glyph placement records. Record
//! positions are numbered from [`FIRST_POSITION`]; a reserved range holds the
//! controller button icons and the regular characters start at
//! [`FIRST_GLYPH_POSITION`].

mod reader;
mod writer;

pub use reader::{parse_fte_bytes, read_fte};
pub use writer::{INDEX_ALPHABET, serialize_fte, serialize_glyph_index, write_fte};

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Size of the fixed file header.
pub const HEADER_SIZE: u64 = 0x08;

/// Size of one glyph record.
pub const RECORD_SIZE: usize = 0x18;

/// Position of the first record in the file.
pub const FIRST_POSITION: u32 = 0x64;

/// Position of the first regular character.
pub const FIRST_GLYPH_POSITION: u32 = 0x82;

/// Records before the first regular character, buttons and filler included.
pub const RESERVED_RECORDS: u32 = FIRST_GLYPH_POSITION - FIRST_POSITION;

/// Number of controller button glyphs.
pub const BUTTON_GLYPH_COUNT: usize = 13;

/// Position of the directional pad icon, apart from the other buttons.
pub const DPAD_POSITION: u32 = 0x78;

/// Whether the record at `position` holds a button icon.
#[must_use]
pub fn is_button_position(position: u32) -> bool {
    (FIRST_POSITION..=0x6F).contains(&position) || position == DPAD_POSITION
}

/// A texture page referenced by glyph records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureRef {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl TextureRef {
    #[must_use]
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }
}

/// Pixel rectangle of a glyph inside its texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// `a <= b`, false if either is NaN.
fn in_order(a: f32, b: f32) -> bool {
    matches!(a.partial_cmp(&b), Some(Ordering::Less | Ordering::Equal))
}

/// Placement of one glyph, as UV fractions of its texture.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlyphRecord {
    pub texture_index: u32,
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    /// UTF-16 code unit, zero for button icons.
    pub character: u16,
}

impl GlyphRecord {
    /// Convert a pixel rectangle on `texture` into UV fractions.
    #[must_use]
    pub fn from_pixels(texture_index: u32, texture: &TextureRef, rect: PixelRect, character: u16) -> Self {
        let width = texture.width as f32;
        let height = texture.height as f32;
        Self {
            texture_index,
            left: rect.x as f32 / width,
            top: rect.y as f32 / height,
            right: rect.x.saturating_add(rect.width) as f32 / width,
            bottom: rect.y.saturating_add(rect.height) as f32 / height,
            character,
        }
    }

    fn check(&self, texture_count: usize) -> std::result::Result<(), String> {
        if !in_order(self.left, self.right) {
            return Err(format!("left {} is past right {}", self.left, self.right));
        }
        if !in_order(self.top, self.bottom) {
            return Err(format!("top {} is below bottom {}", self.top, self.bottom));
        }
        if self.texture_index as usize >= texture_count {
            return Err(format!(
                "texture index {} out of range for {} textures",
                self.texture_index, texture_count
            ));
        }
        Ok(())
    }
}

/// A font atlas table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontAtlas {
    pub textures: Vec<TextureRef>,
    /// Exactly [`BUTTON_GLYPH_COUNT`] records once loaded.
    pub button_glyphs: Vec<GlyphRecord>,
    /// Regular characters in atlas order.
    pub glyphs: Vec<GlyphRecord>,
}

impl FontAtlas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.textures.clear();
        self.button_glyphs.clear();
        self.glyphs.clear();
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.glyphs.is_empty()
    }

    /// Regular characters in atlas order, one per glyph.
    ///
    /// Glyph `k` always yields the `k`-th char so positions line up with the
    /// values a generated database assigns. A surrogate code unit becomes
    /// `U+FFFD`.
    #[must_use]
    pub fn characters(&self) -> String {
        self.glyphs
            .iter()
            .map(|g| char::from_u32(u32::from(g.character)).unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }

    /// Texture shared by the button icons.
    #[must_use]
    pub fn button_texture_index(&self) -> Option<u32> {
        self.button_glyphs.first().map(|g| g.texture_index)
    }

    /// Check the atlas can be exported.
    ///
    /// # Errors
    ///
    /// [`Error::ButtonGlyphCount`] unless there are exactly
    /// [`BUTTON_GLYPH_COUNT`] button glyphs, [`Error::InvalidGlyph`] for a
    /// flipped rectangle or a texture index past the texture list.
    ///
    /// [`Error::ButtonGlyphCount`]: crate::Error::ButtonGlyphCount
    /// [`Error::InvalidGlyph`]: crate::Error::InvalidGlyph
    pub fn validate(&self) -> Result<()> {
        if self.button_glyphs.len() != BUTTON_GLYPH_COUNT {
            return Err(Error::ButtonGlyphCount {
                expected: BUTTON_GLYPH_COUNT,
                found: self.button_glyphs.len(),
            });
        }

        for (kind, list) in [("button glyph", &self.button_glyphs), ("glyph", &self.glyphs)] {
            for (index, glyph) in list.iter().enumerate() {
                glyph
                    .check(self.textures.len())
                    .map_err(|message| Error::InvalidGlyph {
                        index,
                        message: format!("{kind}: {message}"),
                    })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_atlas(characters: &str) -> FontAtlas {
        let textures = vec![TextureRef::new("All_000", 256, 128), TextureRef::new("Buttons", 64, 64)];
        let button_glyphs = (0..BUTTON_GLYPH_COUNT as u32)
            .map(|i| GlyphRecord::from_pixels(1, &textures[1], PixelRect { x: i * 4, y: 0, width: 4, height: 4 }, 0))
            .collect();
        let glyphs = characters
            .encode_utf16()
            .zip(0u32..)
            .map(|(c, i)| GlyphRecord::from_pixels(0, &textures[0], PixelRect { x: i * 8, y: 8, width: 8, height: 16 }, c))
            .collect();
        FontAtlas {
            textures,
            button_glyphs,
            glyphs,
        }
    }

    #[test]
    fn test_button_positions() {
        let buttons: Vec<u32> = (FIRST_POSITION..FIRST_GLYPH_POSITION)
            .filter(|&p| is_button_position(p))
            .collect();
        assert_eq!(buttons.len(), BUTTON_GLYPH_COUNT);
        assert_eq!(buttons.last(), Some(&0x78));
        assert!(!is_button_position(0x70));
        assert!(!is_button_position(0x82));
        assert_eq!(RESERVED_RECORDS, 0x1E);
    }

    #[test]
    fn test_from_pixels() {
        let texture = TextureRef::new("t", 200, 100);
        let glyph = GlyphRecord::from_pixels(0, &texture, PixelRect { x: 50, y: 25, width: 50, height: 50 }, u16::from(b'a'));
        assert_eq!((glyph.left, glyph.top, glyph.right, glyph.bottom), (0.25, 0.25, 0.5, 0.75));
        assert_eq!(glyph.character, 0x61);
    }

    #[test]
    fn test_characters_and_button_texture() {
        let atlas = sample_atlas("Hé!");
        assert_eq!(atlas.characters(), "Hé!");
        assert_eq!(atlas.button_texture_index(), Some(1));
        assert!(atlas.is_loaded());

        let mut atlas = atlas;
        atlas.reset();
        assert!(!atlas.is_loaded());
        assert_eq!(atlas.button_texture_index(), None);
    }

    #[test]
    fn test_characters_one_per_glyph() {
        // U+1F600 as a surrogate pair spread over two glyphs
        let mut atlas = sample_atlas("ab");
        atlas.glyphs[0].character = 0xD83D;
        atlas.glyphs[1].character = 0xDE00;
        atlas.glyphs.push(GlyphRecord {
            character: u16::from(b'c'),
            ..atlas.glyphs[1]
        });

        let characters = atlas.characters();
        assert_eq!(characters.chars().count(), atlas.glyphs.len());
        assert_eq!(characters, "\u{FFFD}\u{FFFD}c");
    }

    #[test]
    fn test_validate() {
        assert!(sample_atlas("ab").validate().is_ok());

        let mut atlas = sample_atlas("ab");
        atlas.button_glyphs.pop();
        assert!(matches!(
            atlas.validate(),
            Err(Error::ButtonGlyphCount { expected: 13, found: 12 })
        ));

        let mut atlas = sample_atlas("ab");
        atlas.glyphs[1].left = 0.9;
        assert!(matches!(atlas.validate(), Err(Error::InvalidGlyph { index: 1, .. })));

        let mut atlas = sample_atlas("ab");
        atlas.button_glyphs[3].texture_index = 2;
        match atlas.validate() {
            Err(Error::InvalidGlyph { index, message }) => {
                assert_eq!(index, 3);
                assert!(message.starts_with("button glyph"));
            }
            other => panic!("expected InvalidGlyph, got {other:?}"),
        }
    }
}
