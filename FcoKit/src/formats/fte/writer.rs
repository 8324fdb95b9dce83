//! `.fte` serialization and the glyph index written next to it

use std::path::{Path, PathBuf};

use super::{
    FIRST_GLYPH_POSITION, FIRST_POSITION, FontAtlas, GlyphRecord, RECORD_SIZE, RESERVED_RECORDS,
    is_button_position,
};
use crate::error::{Error, Result};
use crate::formats::common::{BinaryWriter, write_atomic_all};
use crate::formats::fco::{Color, EncodedSubgroup, EncodedSubtitle, serialize_encoded};

/// Fixed header words.
const HEADER: [u32; 2] = [4, 1];

/// Labels of the glyph index entries, one character per glyph.
pub const INDEX_ALPHABET: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!#$%&'()*+,-./:;<=>?[]^_`{|}~";

/// Label used once the alphabet runs out.
const INDEX_FALLBACK_LABEL: &str = "?";

const INDEX_EXTENSION: &str = "fco";
const INDEX_GROUP_NAME: &str = "All";
const INDEX_SUBGROUP_NAME: &str = "direct";

impl FontAtlas {
    /// Validate and atomically write the atlas to `path`, plus its glyph index
    /// at `path` with an `.fco` extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ButtonGlyphCount`] or [`Error::InvalidGlyph`] before
    /// anything is written, and [`Error::IndexPathCollision`] if `path`
    /// itself ends in `.fco`. Neither file is replaced unless both were
    /// written out.
    ///
    /// [`Error::ButtonGlyphCount`]: crate::Error::ButtonGlyphCount
    /// [`Error::IndexPathCollision`]: crate::Error::IndexPathCollision
    /// [`Error::InvalidGlyph`]: crate::Error::InvalidGlyph
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_fte(self, path)
    }
}

/// Write a `.fte` file and its glyph index to disk.
pub fn write_fte<P: AsRef<Path>>(atlas: &FontAtlas, path: P) -> Result<()> {
    let path = path.as_ref();
    let index_path = index_path(path)?;
    let data = serialize_fte(atlas)?;
    let index = serialize_glyph_index(atlas);

    write_atomic_all(&[(path, data.as_slice()), (index_path.as_path(), index.as_slice())])?;

    tracing::info!(
        "Exported {} ({} glyphs) with index {}",
        path.display(),
        atlas.glyphs.len(),
        index_path.display()
    );
    Ok(())
}

/// Where the glyph index of an atlas exported to `path` goes.
fn index_path(path: &Path) -> Result<PathBuf> {
    let is_fco = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(INDEX_EXTENSION));
    if is_fco {
        return Err(Error::IndexPathCollision {
            path: path.to_path_buf(),
        });
    }
    Ok(path.with_extension(INDEX_EXTENSION))
}

/// Serialize an atlas to `.fte` bytes.
pub fn serialize_fte(atlas: &FontAtlas) -> Result<Vec<u8>> {
    atlas.validate()?;

    let mut writer = BinaryWriter::new();
    for word in HEADER {
        writer.write_u32(word);
    }

    writer.write_u32(atlas.textures.len() as u32);
    for texture in &atlas.textures {
        writer.write_ascii(&texture.name);
        writer.write_u32(texture.width);
        writer.write_u32(texture.height);
    }

    writer.write_u32(RESERVED_RECORDS + atlas.glyphs.len() as u32);

    let mut buttons = atlas.button_glyphs.iter();
    for position in FIRST_POSITION..FIRST_GLYPH_POSITION {
        let button = if is_button_position(position) {
            buttons.next()
        } else {
            None
        };
        match button {
            Some(glyph) => write_record(&mut writer, glyph),
            None => writer.write_zeros(RECORD_SIZE),
        }
    }

    for glyph in &atlas.glyphs {
        write_record(&mut writer, glyph);
    }

    Ok(writer.into_inner())
}

fn write_record(writer: &mut BinaryWriter, glyph: &GlyphRecord) {
    writer.write_u32(glyph.texture_index);
    writer.write_f32(glyph.left);
    writer.write_f32(glyph.top);
    writer.write_f32(glyph.right);
    writer.write_f32(glyph.bottom);
    writer.write_u16(glyph.character);
    writer.write_u16(0);
}

/// Serialize the `.fco` shaped index listing every regular glyph.
///
/// Entry `k` is labelled with the `k`-th character of [`INDEX_ALPHABET`]
/// (or `?` past its end) and holds the single value `0x82 + k`.
#[must_use]
pub fn serialize_glyph_index(atlas: &FontAtlas) -> Vec<u8> {
    let subtitles = (FIRST_GLYPH_POSITION..)
        .zip(0..atlas.glyphs.len())
        .map(|(value, k)| EncodedSubtitle {
            label: index_label(k),
            values: vec![value],
            default_color: Color::default(),
            color_blocks: &[],
        })
        .collect();

    serialize_encoded(
        INDEX_GROUP_NAME,
        &[EncodedSubgroup {
            name: INDEX_SUBGROUP_NAME,
            subtitles,
        }],
    )
}

fn index_label(k: usize) -> &'static str {
    INDEX_ALPHABET.get(k..=k).unwrap_or(INDEX_FALLBACK_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::fte::parse_fte_bytes;
    use crate::formats::fte::tests::sample_atlas;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_alphabet_length() {
        assert_eq!(INDEX_ALPHABET.chars().count(), 91);
        assert!(!INDEX_ALPHABET.contains(&['"', '@', '\\', ' '][..]));
        assert_eq!(index_label(0), "0");
        assert_eq!(index_label(90), "~");
        assert_eq!(index_label(91), "?");
    }

    #[test]
    fn test_layout_and_filler() {
        let atlas = sample_atlas("ab");
        let data = serialize_fte(&atlas).unwrap();

        // header + count + two textures ("All_000" 4+7+1, "Buttons" 4+7+1) + record count
        let records = 8 + 4 + (12 + 8) * 2 + 4;
        assert_eq!(&data[records - 4..records], &[0, 0, 0, 0x20]);
        assert_eq!(data.len(), records + 32 * RECORD_SIZE);

        // position 0x70 is filler
        let filler = records + 12 * RECORD_SIZE;
        assert!(data[filler..filler + RECORD_SIZE].iter().all(|&b| b == 0));
        // position 0x78 is the thirteenth button
        let dpad = records + 20 * RECORD_SIZE;
        assert_eq!(&data[dpad..dpad + 4], &[0, 0, 0, 1]);
    }

    #[test]
    fn test_roundtrip() {
        let atlas = sample_atlas("Hello, world");
        let data = serialize_fte(&atlas).unwrap();
        let parsed = parse_fte_bytes(&data).unwrap();
        assert_eq!(parsed, atlas);
        assert_eq!(serialize_fte(&parsed).unwrap(), data);
    }

    #[test]
    fn test_export_requires_buttons() {
        let mut atlas = sample_atlas("ab");
        atlas.button_glyphs.truncate(3);
        assert!(matches!(
            serialize_fte(&atlas),
            Err(Error::ButtonGlyphCount { found: 3, .. })
        ));
    }

    #[test]
    fn test_failed_export_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("All.fte");

        let mut atlas = sample_atlas("ab");
        atlas.glyphs[0].texture_index = 7;
        assert!(atlas.export(&path).is_err());
        assert!(!path.exists());
        assert!(!temp.path().join("All.fco").exists());
    }

    #[test]
    fn test_export_to_fco_path_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("All.FCO");

        let result = sample_atlas("ab").export(&path);
        assert!(matches!(result, Err(Error::IndexPathCollision { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_index_path() {
        assert_eq!(
            index_path(Path::new("fonts/All.fte")).unwrap(),
            PathBuf::from("fonts/All.fco")
        );
        assert_eq!(index_path(Path::new("All")).unwrap(), PathBuf::from("All.fco"));
    }

    #[test]
    fn test_export_writes_index() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("All.fte");
        let atlas = sample_atlas("xyz");
        atlas.export(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), serialize_fte(&atlas).unwrap());
        assert_eq!(
            std::fs::read(temp.path().join("All.fco")).unwrap(),
            serialize_glyph_index(&atlas)
        );
    }
}
