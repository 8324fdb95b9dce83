//! `.fco` serialization

use std::path::Path;

use super::{
    COLOR_BLOCK_MARKER, Color, ColorBlock, DEFAULT_COLOR_OFFSET, FcoDocument, STYLE_RECORD_SIZE,
    SUBTITLE_TERMINATOR, TEXT_TERMINATOR,
};
use crate::error::{Error, Location, Result};
use crate::formats::common::{BinaryWriter, write_atomic};
use crate::formats::database::SymbolDatabase;

/// Fixed header words.
const HEADER: [u32; 3] = [4, 1, 1];

/// Style record written after every subtitle's text.
///
/// The four zeroed words at [`SIZE_OFFSETS`] receive the subtitle size minus
/// one and the default color is patched in at [`DEFAULT_COLOR_OFFSET`].
#[rustfmt::skip]
const STYLE_TEMPLATE: [u8; STYLE_RECORD_SIZE] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0xFF, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x15,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00,
];

const SIZE_OFFSETS: [usize; 4] = [0x04, 0x14, 0x24, 0x34];

/// A subtitle whose text is already translated to encoded values.
#[derive(Debug, Clone)]
pub(crate) struct EncodedSubtitle<'a> {
    pub label: &'a str,
    pub values: Vec<u32>,
    pub default_color: Color,
    pub color_blocks: &'a [ColorBlock],
}

#[derive(Debug, Clone)]
pub(crate) struct EncodedSubgroup<'a> {
    pub name: &'a str,
    pub subtitles: Vec<EncodedSubtitle<'a>>,
}

impl FcoDocument {
    /// Encode and atomically write the document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedCharacter`] if a symbol is missing from
    /// `database`. The error carries the subtitle's location and the target
    /// file is left untouched.
    ///
    /// [`Error::UnsupportedCharacter`]: crate::Error::UnsupportedCharacter
    pub fn save<P: AsRef<Path>>(&self, path: P, database: &SymbolDatabase) -> Result<()> {
        write_fco(self, path, database)
    }
}

/// Write a `.fco` file to disk.
pub fn write_fco<P: AsRef<Path>>(
    document: &FcoDocument,
    path: P,
    database: &SymbolDatabase,
) -> Result<()> {
    let path = path.as_ref();
    let data = serialize_fco(document, database)?;
    write_atomic(path, &data)?;
    tracing::info!(
        "Saved {} ({} subgroups, {} subtitles)",
        path.display(),
        document.subgroups.len(),
        document.subtitle_total()
    );
    Ok(())
}

/// Serialize a document to `.fco` bytes.
///
/// Every subtitle is encoded before anything is written, so the first
/// unsupported symbol or backwards color block aborts the whole operation.
pub fn serialize_fco(document: &FcoDocument, database: &SymbolDatabase) -> Result<Vec<u8>> {
    let mut subgroups = Vec::with_capacity(document.subgroups.len());

    for (group, subgroup) in document.subgroups.iter().enumerate() {
        let mut subtitles = Vec::with_capacity(subgroup.subtitles.len());
        for (index, subtitle) in subgroup.subtitles.iter().enumerate() {
            let values = subtitle
                .symbols
                .iter()
                .enumerate()
                .map(|(position, symbol)| {
                    database.encode(symbol).ok_or_else(|| Error::UnsupportedCharacter {
                        symbol: symbol.to_string(),
                        index: position,
                        location: Some(Location::new(group, index)),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            if let Some((block, range)) = subtitle
                .color_blocks
                .iter()
                .enumerate()
                .find(|(_, range)| !range.is_ordered())
            {
                return Err(Error::InvalidColorBlock {
                    block,
                    start: range.start,
                    end: range.end,
                    location: Location::new(group, index),
                });
            }

            subtitles.push(EncodedSubtitle {
                label: &subtitle.label,
                values,
                default_color: subtitle.default_color,
                color_blocks: &subtitle.color_blocks,
            });
        }
        subgroups.push(EncodedSubgroup {
            name: &subgroup.name,
            subtitles,
        });
    }

    Ok(serialize_encoded(&document.group_name, &subgroups))
}

/// Lay out already encoded subgroups.
pub(crate) fn serialize_encoded(group_name: &str, subgroups: &[EncodedSubgroup<'_>]) -> Vec<u8> {
    let mut writer = BinaryWriter::new();

    for word in HEADER {
        writer.write_u32(word);
    }
    writer.write_ascii(group_name);
    writer.write_u32(subgroups.len() as u32);

    for subgroup in subgroups {
        writer.write_ascii(subgroup.name);
        writer.write_u32(subgroup.subtitles.len() as u32);
        for subtitle in &subgroup.subtitles {
            write_subtitle(&mut writer, subtitle);
        }
    }

    writer.into_inner()
}

fn write_subtitle(writer: &mut BinaryWriter, subtitle: &EncodedSubtitle<'_>) {
    writer.write_ascii(subtitle.label);

    let size = subtitle.values.len() as u32;
    writer.write_u32(size);
    for &value in &subtitle.values {
        writer.write_u32(value);
    }
    writer.write_u32(TEXT_TERMINATOR);

    writer.write_bytes(&style_record(size, subtitle.default_color));

    writer.write_u32(subtitle.color_blocks.len() as u32);
    for block in subtitle.color_blocks {
        writer.write_u32(block.start);
        writer.write_u32(block.end);
        writer.write_u32(COLOR_BLOCK_MARKER);
        writer.write_bytes(&block.color.to_argb());
    }

    writer.write_u32(SUBTITLE_TERMINATOR);
}

/// Fill in the style template for a subtitle of `size` values.
fn style_record(size: u32, default_color: Color) -> [u8; STYLE_RECORD_SIZE] {
    let mut record = STYLE_TEMPLATE;
    let last = size.wrapping_sub(1).to_be_bytes();
    for offset in SIZE_OFFSETS {
        record[offset..offset + 4].copy_from_slice(&last);
    }
    record[DEFAULT_COLOR_OFFSET..DEFAULT_COLOR_OFFSET + 4].copy_from_slice(&default_color.to_argb());
    record
}
