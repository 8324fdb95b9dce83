//! Splitting subtitle text into symbols
//!
//! A `\` starts an escape token that runs up to and including the next `\`
//! (`\A\`, `\Start\`). Every other character is a symbol on its own.

use crate::error::{Error, Result};
use crate::formats::database::{ESCAPE_MARKER, Symbol, SymbolDatabase};

/// Split `text` into symbols without consulting a database.
///
/// # Errors
///
/// Returns [`Error::MalformedEscape`] if a `\` has no closing `\`.
///
/// [`Error::MalformedEscape`]: crate::Error::MalformedEscape
pub fn tokenize(text: &str) -> Result<Vec<Symbol>> {
    let chars: Vec<char> = text.chars().collect();
    let mut symbols = Vec::with_capacity(chars.len());

    let mut index = 0;
    while index < chars.len() {
        if chars[index] == ESCAPE_MARKER {
            let close = chars[index + 1..]
                .iter()
                .position(|&c| c == ESCAPE_MARKER)
                .ok_or(Error::MalformedEscape {
                    index,
                    location: None,
                })?;
            let end = index + 1 + close;
            symbols.push(Symbol::new(chars[index..=end].iter().collect::<String>()));
            index = end + 1;
        } else {
            symbols.push(Symbol::from(chars[index]));
            index += 1;
        }
    }

    Ok(symbols)
}

/// Split `text` into symbols and check that each one can be encoded.
///
/// Color block ranges index into the returned sequence, not into the raw
/// characters of `text`.
///
/// # Errors
///
/// Returns [`Error::MalformedEscape`] for an unterminated escape token and
/// [`Error::UnsupportedCharacter`] for a symbol missing from `database`.
/// No partial result is returned.
///
/// [`Error::MalformedEscape`]: crate::Error::MalformedEscape
/// [`Error::UnsupportedCharacter`]: crate::Error::UnsupportedCharacter
pub fn validate_string(text: &str, database: &SymbolDatabase) -> Result<Vec<Symbol>> {
    let symbols = tokenize(text)?;

    if let Some((index, symbol)) = symbols
        .iter()
        .enumerate()
        .find(|(_, symbol)| !database.contains_symbol(symbol))
    {
        return Err(Error::UnsupportedCharacter {
            symbol: symbol.to_string(),
            index,
            location: None,
        });
    }

    Ok(symbols)
}
