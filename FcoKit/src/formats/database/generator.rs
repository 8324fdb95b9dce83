//! Database generation from a font's character list

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;
use crate::formats::common::write_atomic;

/// Controller button tokens and the values the game reserves for them.
pub const BUTTON_SYMBOLS: [(u32, &str); 13] = [
    (0x64, "\\A\\"),
    (0x65, "\\B\\"),
    (0x66, "\\Y\\"),
    (0x67, "\\X\\"),
    (0x68, "\\LB\\"),
    (0x69, "\\RB\\"),
    (0x6A, "\\LT\\"),
    (0x6B, "\\RT\\"),
    (0x6C, "\\Start\\"),
    (0x6D, "\\Back\\"),
    (0x6E, "\\LStick\\"),
    (0x6F, "\\RStick\\"),
    (0x78, "\\DPad\\"),
];

/// Value assigned to the first regular character of the font.
pub const FIRST_CHARACTER_VALUE: u32 = 0x82;

fn push_line(out: &mut String, value: u32, symbol: &str) {
    let [b0, b1, b2, b3] = value.to_be_bytes();
    let _ = writeln!(out, "{b0:02X} {b1:02X} {b2:02X} {b3:02X} = {symbol}");
}

/// Render a database for a font whose glyphs are `characters`, in atlas order.
///
/// Output starts with a UTF-8 byte order mark.
#[must_use]
pub fn generate_database_text(characters: &str) -> String {
    let mut out = String::from('\u{FEFF}');

    for (value, symbol) in BUTTON_SYMBOLS {
        push_line(&mut out, value, symbol);
    }

    let mut buffer = [0u8; 4];
    for (value, c) in (FIRST_CHARACTER_VALUE..).zip(characters.chars()) {
        push_line(&mut out, value, c.encode_utf8(&mut buffer));
    }

    out
}

/// Generate and write a database file for `characters`.
pub fn write_database<P: AsRef<Path>>(path: P, characters: &str) -> Result<()> {
    let text = generate_database_text(characters);
    write_atomic(&path, text.as_bytes())?;
    tracing::info!(
        "Generated symbol database with {} characters at {}",
        characters.chars().count(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::database::{Symbol, SymbolDatabase};

    #[test]
    fn test_generate_layout() {
        let text = generate_database_text("ab");
        let lines: Vec<&str> = text.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[0], "00 00 00 64 = \\A\\");
        assert_eq!(lines[12], "00 00 00 78 = \\DPad\\");
        assert_eq!(lines[13], "00 00 00 82 = a");
        assert_eq!(lines[14], "00 00 00 83 = b");
    }

    #[test]
    fn test_generated_text_loads_back() {
        let database = SymbolDatabase::parse_str(&generate_database_text("Hi!"));
        assert_eq!(database.encode("\\RStick\\"), Some(0x6F));
        assert_eq!(database.encode("H"), Some(0x82));
        assert_eq!(database.encode("!"), Some(0x84));
        assert_eq!(database.decode(0x83).map(Symbol::as_str), Some("i"));
    }
}
