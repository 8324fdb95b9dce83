//! CLI commands for FTE font atlas operations

use std::path::Path;

use fcokit::formats::fte::FontAtlas;

use super::Context;

fn import(context: &mut Context, path: &Path) -> anyhow::Result<FontAtlas> {
    let atlas = FontAtlas::import(path)?;
    context.remember_fte(path);
    Ok(atlas)
}

/// Show textures and glyph counts
pub fn info(context: &mut Context, path: &Path) -> anyhow::Result<()> {
    let atlas = import(context, path)?;

    println!("Textures: {}", atlas.textures.len());
    for (index, texture) in atlas.textures.iter().enumerate() {
        let role = if atlas.button_texture_index() == Some(index as u32) {
            " (buttons)"
        } else {
            ""
        };
        println!("  [{index}] {} {}x{}{role}", texture.name, texture.width, texture.height);
    }
    println!("Button glyphs: {}", atlas.button_glyphs.len());
    println!("Glyphs: {}", atlas.glyphs.len());

    if let Err(err) = atlas.validate() {
        println!("Warning: {err}");
    }
    Ok(())
}

/// Print the font's characters
pub fn characters(context: &mut Context, path: &Path) -> anyhow::Result<()> {
    let atlas = import(context, path)?;
    println!("{}", atlas.characters());
    Ok(())
}

/// Re-export an atlas, writing the glyph index next to it
pub fn rewrite(context: &mut Context, path: &Path, output: &Path) -> anyhow::Result<()> {
    let atlas = import(context, path)?;
    atlas.export(output)?;
    println!(
        "Wrote {} and {}",
        output.display(),
        output.with_extension("fco").display()
    );
    Ok(())
}
