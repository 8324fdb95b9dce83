//! `.fte` parsing

use std::path::Path;

use super::{
    FIRST_GLYPH_POSITION, FIRST_POSITION, FontAtlas, GlyphRecord, HEADER_SIZE, RECORD_SIZE,
    TextureRef, is_button_position,
};
use crate::error::Result;
use crate::formats::common::{BinaryReader, read_file};

impl FontAtlas {
    /// Load a `.fte` file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for a missing file and
    /// [`Error::UnexpectedEof`] for truncated data.
    ///
    /// [`Error::NotFound`]: crate::Error::NotFound
    /// [`Error::UnexpectedEof`]: crate::Error::UnexpectedEof
    pub fn import<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_fte(path)
    }
}

/// Read a `.fte` file from disk.
pub fn read_fte<P: AsRef<Path>>(path: P) -> Result<FontAtlas> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    let atlas = parse_fte_bytes(&bytes)?;
    tracing::info!(
        "Loaded {} ({} textures, {} button glyphs, {} glyphs)",
        path.display(),
        atlas.textures.len(),
        atlas.button_glyphs.len(),
        atlas.glyphs.len()
    );
    Ok(atlas)
}

/// Parse `.fte` data from bytes.
pub fn parse_fte_bytes(data: &[u8]) -> Result<FontAtlas> {
    let mut reader = BinaryReader::new(data);
    reader.seek_to(HEADER_SIZE)?;

    let texture_count = reader.read_u32()? as usize;
    let mut textures = Vec::with_capacity(texture_count.min(reader.remaining()));
    for _ in 0..texture_count {
        let name = reader.read_ascii()?;
        let width = reader.read_u32()?;
        let height = reader.read_u32()?;
        textures.push(TextureRef {
            name,
            width,
            height,
        });
    }

    let record_count = reader.read_u32()?;
    let mut atlas = FontAtlas {
        textures,
        button_glyphs: Vec::new(),
        glyphs: Vec::with_capacity((record_count as usize).min(reader.remaining() / RECORD_SIZE)),
    };

    for position in (FIRST_POSITION..).take(record_count as usize) {
        if is_button_position(position) {
            atlas.button_glyphs.push(read_record(&mut reader)?);
        } else if position >= FIRST_GLYPH_POSITION {
            atlas.glyphs.push(read_record(&mut reader)?);
        } else {
            reader.skip(RECORD_SIZE)?;
        }
    }

    tracing::debug!(
        "Parsed {} records, button texture {:?}",
        record_count,
        atlas.button_texture_index()
    );
    Ok(atlas)
}

fn read_record(reader: &mut BinaryReader<'_>) -> Result<GlyphRecord> {
    let texture_index = reader.read_u32()?;
    let left = reader.read_f32()?;
    let top = reader.read_f32()?;
    let right = reader.read_f32()?;
    let bottom = reader.read_f32()?;
    let character = reader.read_u16()?;
    // Padding
    reader.skip(2)?;

    Ok(GlyphRecord {
        texture_index,
        left,
        top,
        right,
        bottom,
        character,
    })
}
