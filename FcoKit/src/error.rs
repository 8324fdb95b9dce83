//! Error types for `FcoKit`

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Group/subtitle coordinates attached to text errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Subgroup index within the document.
    pub group: usize,
    /// Subtitle index within the subgroup.
    pub subtitle: usize,
}

impl Location {
    #[must_use]
    pub fn new(group: usize, subtitle: usize) -> Self {
        Self { group, subtitle }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(GroupID: {}, SubtitleID: {})", self.group, self.subtitle)
    }
}

fn prefix(location: Option<&Location>) -> String {
    location.map(|l| format!("{l} ")).unwrap_or_default()
}

/// The error type for `FcoKit` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// A referenced file (database, `.fco`, `.fte`) does not exist.
    #[error("file not found: {}", .path.display())]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The data ended in the middle of a record.
    #[error("unexpected end of file")]
    UnexpectedEof,

    // ==================== Subtitle (fco) Errors ====================
    /// An encoded value in a subtitle has no entry in the symbol database.
    #[error(
        "{location} 0x{value:08x} is missing reference symbol, find the respective character in All.fte and update fcoDatabase.txt"
    )]
    MalformedEncoding {
        /// The unknown encoded value.
        value: u32,
        /// The subtitle that contains it.
        location: Location,
    },

    /// A character or escape token has no entry in the symbol database.
    #[error("{}unsupported character \"{symbol}\" found at index {index}", prefix(.location.as_ref()))]
    UnsupportedCharacter {
        /// The symbol that could not be encoded.
        symbol: String,
        /// Symbol index within the subtitle (or input text).
        index: usize,
        /// Where the symbol was found, when known.
        location: Option<Location>,
    },

    /// A `\` escape token is missing its closing `\`.
    #[error("{}error in special character formatting at index {index}, must be \\xxxx\\", prefix(.location.as_ref()))]
    MalformedEscape {
        /// Character index of the opening `\`.
        index: usize,
        /// Where the token was found, when known.
        location: Option<Location>,
    },

    /// A color block ends before it starts.
    #[error("{location} color block {block} runs backwards from {start} to {end}")]
    InvalidColorBlock {
        /// Index of the block within its subtitle.
        block: usize,
        start: u32,
        end: u32,
        /// The subtitle that owns the block.
        location: Location,
    },

    // ==================== Font Atlas (fte) Errors ====================
    /// The atlas does not carry exactly one record per button slot.
    #[error("expected {expected} button glyphs, found {found}")]
    ButtonGlyphCount {
        /// Required number of button glyphs.
        expected: usize,
        /// Number of button glyphs present.
        found: usize,
    },

    /// A glyph record has a flipped UV rectangle or an unknown texture.
    #[error("invalid glyph {index}: {message}")]
    InvalidGlyph {
        /// Index of the glyph within its list.
        index: usize,
        /// Description of what is invalid.
        message: String,
    },

    /// The export path would be overwritten by its own glyph index.
    #[error("cannot export a font atlas to {}, the glyph index is written there", .path.display())]
    IndexPathCollision {
        /// The requested export path.
        path: PathBuf,
    },

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// Attach a subtitle location to a text error that does not carry one yet.
    #[must_use]
    pub fn at(self, at: Location) -> Self {
        match self {
            Error::UnsupportedCharacter {
                symbol,
                index,
                location: None,
            } => Error::UnsupportedCharacter {
                symbol,
                index,
                location: Some(at),
            },
            Error::MalformedEscape {
                index,
                location: None,
            } => Error::MalformedEscape {
                index,
                location: Some(at),
            },
            other => other,
        }
    }
}

/// A specialized Result type for `FcoKit` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_fills_missing_location() {
        let err = Error::UnsupportedCharacter {
            symbol: "Z".to_string(),
            index: 2,
            location: None,
        }
        .at(Location::new(1, 4));
        assert!(matches!(
            err,
            Error::UnsupportedCharacter {
                location: Some(Location { group: 1, subtitle: 4 }),
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "(GroupID: 1, SubtitleID: 4) unsupported character \"Z\" found at index 2"
        );
    }

    #[test]
    fn test_at_keeps_existing_location() {
        let err = Error::MalformedEscape {
            index: 0,
            location: Some(Location::new(0, 0)),
        }
        .at(Location::new(3, 3));
        assert!(matches!(
            err,
            Error::MalformedEscape {
                location: Some(Location { group: 0, subtitle: 0 }),
                ..
            }
        ));

        let eof = Error::UnexpectedEof.at(Location::new(1, 1));
        assert!(matches!(eof, Error::UnexpectedEof));
    }
}
