//! CLI commands for FCO subtitle database operations

use std::path::Path;

use anyhow::bail;
use fcokit::Location;
use fcokit::formats::database::SymbolDatabase;
use fcokit::formats::fco::{FcoDocument, validate_string};

use super::Context;

fn load(context: &mut Context, path: &Path) -> anyhow::Result<(SymbolDatabase, FcoDocument)> {
    let database = context.database()?;
    let document = FcoDocument::load(path, &database)?;
    context.remember_fco(path);
    Ok((database, document))
}

/// Print a document as a tree or as JSON
pub fn dump(context: &mut Context, path: &Path, json: bool) -> anyhow::Result<()> {
    let (_, document) = load(context, path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print!("{document}");
    }
    Ok(())
}

/// List subtitles whose text contains `query`
pub fn search(context: &mut Context, path: &Path, query: &str, limit: usize) -> anyhow::Result<()> {
    let (_, document) = load(context, path)?;

    let mut found = 0;
    let mut cursor = (0, 0);
    while found < limit {
        let Some((group, subtitle)) = document.find_next(query, cursor.0, cursor.1) else {
            break;
        };
        let label = document.label(group, subtitle).unwrap_or_default();
        let text = document.text(group, subtitle).unwrap_or_default();
        println!("[{group}:{subtitle}] {label}: {}", text.replace('\n', "\\n"));

        found += 1;
        cursor = (group, subtitle + 1);
    }

    if found == 0 {
        println!("No subtitles found matching '{query}'");
    } else {
        println!("\nFound {found} subtitle(s)");
    }
    Ok(())
}

/// Check that `text` can be encoded
pub fn validate(context: &Context, text: &str) -> anyhow::Result<()> {
    let database = context.database()?;
    let symbols = validate_string(text, &database)?;
    println!("OK: {} symbols", symbols.len());
    Ok(())
}

/// Replace the text of one subtitle
pub fn set_text(
    context: &mut Context,
    path: &Path,
    group: usize,
    subtitle: usize,
    text: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let (database, mut document) = load(context, path)?;
    let symbols = validate_string(text, &database)
        .map_err(|err| err.at(Location::new(group, subtitle)))?;

    if !document.modify_subtitle(group, subtitle, symbols).is_applied() {
        bail!("no subtitle {subtitle} in group {group}");
    }

    document.save(output.unwrap_or(path), &database)?;
    println!("Updated subtitle {subtitle} in group {group}");
    Ok(())
}

/// Append a subgroup
pub fn add_group(context: &mut Context, path: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let (database, mut document) = load(context, path)?;

    let index = document.add_group();
    if let Some(name) = name {
        document.rename_group(index, name);
    }

    document.save(path, &database)?;
    println!("Added group {index}");
    Ok(())
}

/// Remove a subgroup
pub fn delete_group(context: &mut Context, path: &Path, group: usize) -> anyhow::Result<()> {
    let (database, mut document) = load(context, path)?;

    if !document.delete_group(group).is_applied() {
        bail!("no group {group}, the file has {}", document.group_count());
    }

    document.save(path, &database)?;
    println!("Deleted group {group}");
    Ok(())
}

/// Load and save a document unchanged
pub fn resave(context: &mut Context, path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let (database, document) = load(context, path)?;
    let target = output.unwrap_or(path);
    document.save(target, &database)?;
    println!("Saved {}", target.display());
    Ok(())
}
