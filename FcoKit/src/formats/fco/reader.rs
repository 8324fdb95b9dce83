//! `.fco` parsing

use std::path::Path;

use super::{
    Color, ColorBlock, DEFAULT_COLOR_OFFSET, FcoDocument, HEADER_SIZE, STYLE_RECORD_SIZE,
    Subgroup, Subtitle, TEXT_TERMINATOR,
};
use crate::error::{Error, Location, Result};
use crate::formats::common::{BinaryReader, read_file};
use crate::formats::database::SymbolDatabase;

impl FcoDocument {
    /// Load a `.fco` file, decoding its text through `database`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for a missing file, [`Error::UnexpectedEof`]
    /// for truncated data and [`Error::MalformedEncoding`] for a value the
    /// database does not know. Nothing is returned on failure.
    ///
    /// [`Error::NotFound`]: crate::Error::NotFound
    /// [`Error::UnexpectedEof`]: crate::Error::UnexpectedEof
    /// [`Error::MalformedEncoding`]: crate::Error::MalformedEncoding
    pub fn load<P: AsRef<Path>>(path: P, database: &SymbolDatabase) -> Result<Self> {
        read_fco(path, database)
    }
}

/// Read a `.fco` file from disk.
pub fn read_fco<P: AsRef<Path>>(path: P, database: &SymbolDatabase) -> Result<FcoDocument> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    let document = parse_fco_bytes(&bytes, database)?;
    tracing::info!(
        "Loaded {} ({} subgroups, {} subtitles)",
        path.display(),
        document.subgroups.len(),
        document.subtitle_total()
    );
    Ok(document)
}

/// Parse `.fco` data from bytes.
pub fn parse_fco_bytes(data: &[u8], database: &SymbolDatabase) -> Result<FcoDocument> {
    let mut reader = BinaryReader::new(data);
    reader.seek_to(HEADER_SIZE)?;

    let group_name = reader.read_ascii()?;
    let subgroup_count = reader.read_u32()? as usize;
    tracing::debug!("Group {:?} with {} subgroups", group_name, subgroup_count);

    let mut subgroups = Vec::with_capacity(subgroup_count.min(reader.remaining()));
    for group in 0..subgroup_count {
        subgroups.push(read_subgroup(&mut reader, database, group)?);
    }

    if reader.remaining() > 0 {
        tracing::debug!("Ignoring {} trailing bytes", reader.remaining());
    }

    Ok(FcoDocument {
        group_name,
        subgroups,
    })
}

fn read_subgroup(
    reader: &mut BinaryReader<'_>,
    database: &SymbolDatabase,
    group: usize,
) -> Result<Subgroup> {
    let name = reader.read_ascii()?;
    let subtitle_count = reader.read_u32()? as usize;

    let mut subtitles = Vec::with_capacity(subtitle_count.min(reader.remaining()));
    for subtitle in 0..subtitle_count {
        let location = Location::new(group, subtitle);
        subtitles.push(read_subtitle(reader, database, location)?);
    }

    Ok(Subgroup { name, subtitles })
}

fn read_subtitle(
    reader: &mut BinaryReader<'_>,
    database: &SymbolDatabase,
    location: Location,
) -> Result<Subtitle> {
    let label = reader.read_ascii()?;

    let value_count = reader.read_u32()? as usize;
    let mut symbols = Vec::with_capacity(value_count.min(reader.remaining() / 4));
    for _ in 0..value_count {
        let value = reader.read_u32()?;
        // Some files carry an early terminator inside the text
        if value == TEXT_TERMINATOR {
            continue;
        }
        let symbol = database
            .decode(value)
            .ok_or(Error::MalformedEncoding { value, location })?;
        symbols.push(symbol.clone());
    }

    // Text terminator
    reader.skip(4)?;

    let style: [u8; STYLE_RECORD_SIZE] = reader.read_array()?;
    let default_color = Color::from_argb([
        style[DEFAULT_COLOR_OFFSET],
        style[DEFAULT_COLOR_OFFSET + 1],
        style[DEFAULT_COLOR_OFFSET + 2],
        style[DEFAULT_COLOR_OFFSET + 3],
    ]);

    let block_count = reader.read_u32()? as usize;
    let mut color_blocks = Vec::with_capacity(block_count.min(reader.remaining() / 16));
    for _ in 0..block_count {
        let start = reader.read_u32()?;
        let end = reader.read_u32()?;
        // Block marker
        reader.skip(4)?;
        let color = Color::from_argb(reader.read_array()?);
        if start > end {
            tracing::warn!("{} color block runs backwards from {} to {}", location, start, end);
        }
        color_blocks.push(ColorBlock { start, end, color });
    }

    // Subtitle terminator
    reader.skip(4)?;

    Ok(Subtitle {
        label,
        symbols,
        default_color,
        color_blocks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::common::BinaryWriter;
    use crate::formats::database::Symbol;

    fn database() -> SymbolDatabase {
        SymbolDatabase::parse_str("00 00 00 64 = \\A\\\n00 00 00 82 = H\n00 00 00 83 = i\n")
    }

    /// Hand-built file with one subgroup and one subtitle.
    fn sample(values: &[u32]) -> Vec<u8> {
        let mut writer = BinaryWriter::new();
        writer.write_u32(4);
        writer.write_u32(1);
        writer.write_u32(1);
        writer.write_ascii("Root");
        writer.write_u32(1);
        writer.write_ascii("Sub");
        writer.write_u32(1);
        writer.write_ascii("Line");
        writer.write_u32(u32::try_from(values.len()).unwrap());
        for &value in values {
            writer.write_u32(value);
        }
        writer.write_u32(TEXT_TERMINATOR);
        let mut style = [0u8; STYLE_RECORD_SIZE];
        style[DEFAULT_COLOR_OFFSET..DEFAULT_COLOR_OFFSET + 4].copy_from_slice(&[0xFF, 0x10, 0x20, 0x30]);
        writer.write_bytes(&style);
        writer.write_u32(1);
        writer.write_u32(0);
        writer.write_u32(1);
        writer.write_u32(2);
        writer.write_bytes(&[0x80, 0, 0, 0]);
        writer.write_u32(0);
        writer.into_inner()
    }

    #[test]
    fn test_parse_sample() {
        let document = parse_fco_bytes(&sample(&[0x64, 0x82, 0x00, 0x83]), &database()).unwrap();
        assert_eq!(document.group_name, "Root");
        assert_eq!(document.subgroups.len(), 1);
        assert_eq!(document.subgroups[0].name, "Sub");

        let subtitle = &document.subgroups[0].subtitles[0];
        assert_eq!(subtitle.label, "Line");
        assert_eq!(subtitle.text(), "\\A\\H\ni");
        assert_eq!(subtitle.subtitle_size(), 4);
        assert_eq!(subtitle.default_color, Color::rgba(0x10, 0x20, 0x30, 0xFF));
        assert_eq!(subtitle.color_blocks.len(), 1);
        assert_eq!(subtitle.color_blocks[0].start, 0);
        assert_eq!(subtitle.color_blocks[0].end, 1);
        assert!(subtitle.color_blocks[0].color.is_hardcoded());
        assert_eq!(subtitle.color_blocks[0].color.a, 0x80);
    }

    #[test]
    fn test_early_terminator_is_skipped() {
        let document = parse_fco_bytes(&sample(&[0x82, TEXT_TERMINATOR, 0x83]), &database()).unwrap();
        let symbols = &document.subgroups[0].subtitles[0].symbols;
        assert_eq!(symbols, &vec![Symbol::from("H"), Symbol::from("i")]);
    }

    #[test]
    fn test_unknown_value_is_fatal() {
        let result = parse_fco_bytes(&sample(&[0x82, 0x1234]), &database());
        match result {
            Err(Error::MalformedEncoding { value, location }) => {
                assert_eq!(value, 0x1234);
                assert_eq!(location, Location::new(0, 0));
            }
            other => panic!("expected MalformedEncoding, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_encoding_message() {
        let err = parse_fco_bytes(&sample(&[0xBEEF]), &database()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "(GroupID: 0, SubtitleID: 0) 0x0000beef is missing reference symbol, find the respective character in All.fte and update fcoDatabase.txt"
        );
    }

    #[test]
    fn test_truncated_file() {
        let data = sample(&[0x82]);
        let result = parse_fco_bytes(&data[..data.len() - 10], &database());
        assert!(matches!(result, Err(Error::UnexpectedEof)));

        assert!(matches!(parse_fco_bytes(&[0, 0, 0, 4], &database()), Err(Error::UnexpectedEof)));
    }
}
