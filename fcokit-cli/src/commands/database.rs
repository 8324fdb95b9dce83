//! CLI commands for the `fcoDatabase.txt` symbol table

use std::fs;
use std::path::Path;

use anyhow::{Context as _, bail};
use fcokit::formats::database::write_database;
use fcokit::formats::fte::FontAtlas;

use super::Context;

/// Generate a symbol table from a character list or a font atlas
pub fn generate(
    characters: Option<&Path>,
    from_fte: Option<&Path>,
    output: &Path,
) -> anyhow::Result<()> {
    let characters = match (characters, from_fte) {
        (Some(path), _) => fs::read_to_string(path)
            .with_context(|| format!("reading character list {}", path.display()))?
            .trim_start_matches('\u{FEFF}')
            .chars()
            .filter(|c| !matches!(c, '\n' | '\r'))
            .collect::<String>(),
        (None, Some(path)) => FontAtlas::import(path)?.characters(),
        (None, None) => bail!("pass --characters or --from-fte"),
    };

    write_database(output, &characters)?;
    println!(
        "Wrote {} ({} characters)",
        output.display(),
        characters.chars().count()
    );
    Ok(())
}

/// Look up a symbol, or the symbol behind a `0x` value
pub fn lookup(context: &Context, query: &str) -> anyhow::Result<()> {
    let database = context.database()?;

    if let Some(hex) = query.strip_prefix("0x").or_else(|| query.strip_prefix("0X")) {
        let value = u32::from_str_radix(hex, 16).with_context(|| format!("invalid value {query}"))?;
        match database.decode(value) {
            Some(symbol) => println!("0x{value:08X} = {:?}", symbol.as_str()),
            None => println!("0x{value:08X} is not in the database"),
        }
        return Ok(());
    }

    match database.encode(query) {
        Some(value) => println!("{query:?} = 0x{value:08X}"),
        None => println!("{query:?} is not in the database"),
    }
    Ok(())
}
