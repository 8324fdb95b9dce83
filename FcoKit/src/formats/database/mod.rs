//! `fcoDatabase.txt` symbol table
//!
//! Maps every symbol the game can display to the 32-bit value stored in
//! `.fco` files, and back. One entry per line:
//!
//! ```text
//! 00 00 00 64 = \A\
//! 00 00 00 82 = a
//! ```
//!
//! The table is built once and shared read-only by every document operation.

mod generator;
mod reader;
mod symbol;

pub use generator::{
    BUTTON_SYMBOLS, FIRST_CHARACTER_VALUE, generate_database_text, write_database,
};
pub use symbol::{ESCAPE_MARKER, Symbol, join_symbols};

use std::collections::BTreeMap;

use indexmap::IndexMap;

/// Encoded value that always maps to a line break.
pub const LINE_BREAK_VALUE: u32 = 0x0000_0000;

/// The symbol stored under [`LINE_BREAK_VALUE`].
pub const LINE_BREAK: &str = "\n";

/// Bidirectional symbol ↔ encoded value table.
#[derive(Debug, Clone)]
pub struct SymbolDatabase {
    forward: IndexMap<Symbol, u32>,
    reverse: BTreeMap<u32, Symbol>,
}

impl SymbolDatabase {
    /// A table holding only the hardcoded line break.
    #[must_use]
    pub fn new() -> Self {
        let mut database = Self {
            forward: IndexMap::new(),
            reverse: BTreeMap::new(),
        };
        database.insert_line_break();
        database
    }

    /// Insert a mapping, keeping the first occurrence of each key.
    ///
    /// # Returns
    /// `true` if both directions were inserted, `false` if either side was a
    /// duplicate and got skipped.
    pub fn insert(&mut self, symbol: impl Into<Symbol>, value: u32) -> bool {
        let symbol = symbol.into();
        let mut inserted = true;

        if let Some(&existing) = self.forward.get(&symbol) {
            tracing::warn!(
                "Symbol {:?} already mapped to 0x{:08X}, ignoring 0x{:08X}",
                symbol.as_str(),
                existing,
                value
            );
            inserted = false;
        } else {
            self.forward.insert(symbol.clone(), value);
        }

        if self.reverse.contains_key(&value) {
            tracing::warn!("Value 0x{:08X} already defined, ignoring {:?}", value, symbol.as_str());
            inserted = false;
        } else {
            self.reverse.insert(value, symbol);
        }

        inserted
    }

    /// Force the `0 ↔ "\n"` mapping, overriding anything parsed from the file.
    fn insert_line_break(&mut self) {
        let line_break = Symbol::from(LINE_BREAK);
        self.forward.insert(line_break.clone(), LINE_BREAK_VALUE);
        self.reverse.insert(LINE_BREAK_VALUE, line_break);
    }

    /// Look up the encoded value of a symbol.
    #[must_use]
    pub fn encode(&self, symbol: &str) -> Option<u32> {
        self.forward.get(symbol).copied()
    }

    /// Look up the symbol of an encoded value.
    #[must_use]
    pub fn decode(&self, value: u32) -> Option<&Symbol> {
        self.reverse.get(&value)
    }

    #[must_use]
    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.forward.contains_key(symbol)
    }

    #[must_use]
    pub fn contains_value(&self, value: u32) -> bool {
        self.reverse.contains_key(&value)
    }

    /// Number of distinct symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Symbols with their encoded values, in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, u32)> {
        self.forward.iter().map(|(symbol, &value)| (symbol, value))
    }
}

impl Default for SymbolDatabase {
    fn default() -> Self {
        Self::new()
    }
}
