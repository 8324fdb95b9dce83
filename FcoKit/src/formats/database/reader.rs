//! `fcoDatabase.txt` loading

use std::collections::BTreeMap;
use std::path::Path;

use indexmap::IndexMap;

use super::SymbolDatabase;
use crate::error::Result;
use crate::formats::common::read_file;

/// `XX XX XX XX` prefix of every line.
const VALUE_WIDTH: usize = 11;

/// Separator between the value and the symbol.
const SEPARATOR: &str = " = ";

impl SymbolDatabase {
    /// Load a symbol database from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the file does not exist, so callers can
    /// disable everything that needs the table without treating it as fatal.
    ///
    /// [`Error::NotFound`]: crate::Error::NotFound
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = read_file(path)?;
        let text = String::from_utf8_lossy(&bytes);
        let database = Self::parse_str(&text);
        tracing::debug!(
            "Loaded {} symbols from {}",
            database.len(),
            path.display()
        );
        Ok(database)
    }

    /// Parse database text.
    ///
    /// Malformed lines are logged and skipped, duplicate symbols or values keep
    /// their first definition.
    #[must_use]
    pub fn parse_str(text: &str) -> Self {
        let mut database = SymbolDatabase {
            forward: IndexMap::new(),
            reverse: BTreeMap::new(),
        };

        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        for (line_number, line) in text.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                continue;
            }

            match parse_line(line) {
                Some((value, symbol)) => {
                    database.insert(symbol, value);
                }
                None => {
                    tracing::warn!("Skipping malformed database line {}: {:?}", line_number + 1, line);
                }
            }
        }

        database.insert_line_break();
        database
    }
}

/// Split one `XX XX XX XX = symbol` line.
fn parse_line(line: &str) -> Option<(u32, &str)> {
    let value = parse_value(line.get(..VALUE_WIDTH)?)?;
    if line.get(VALUE_WIDTH..VALUE_WIDTH + SEPARATOR.len())? != SEPARATOR {
        return None;
    }

    let symbol = line.get(VALUE_WIDTH + SEPARATOR.len()..)?;
    if symbol.is_empty() {
        return None;
    }

    Some((value, symbol))
}

/// Four space separated hex bytes, most significant first.
fn parse_value(field: &str) -> Option<u32> {
    let mut value = 0u32;
    let mut count = 0;

    for part in field.split(' ') {
        if part.len() != 2 {
            return None;
        }
        let byte = u8::from_str_radix(part, 16).ok()?;
        value = (value << 8) | u32::from(byte);
        count += 1;
    }

    (count == 4).then_some(value)
}
