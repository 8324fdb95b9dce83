use fcokit::formats::fco::{parse_fco_bytes, serialize_fco};
use fcokit::formats::fte::{BUTTON_GLYPH_COUNT, INDEX_ALPHABET, parse_fte_bytes, serialize_fte};
use fcokit::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

const DATABASE: &str = concat!(
    "\u{FEFF}",
    "00 00 00 64 = \\A\\\n",
    "00 00 00 65 = \\B\\\n",
    "00 00 00 6C = \\Start\\\n",
    "00 00 00 82 = H\n",
    "00 00 00 83 = e\n",
    "00 00 00 84 = l\n",
    "00 00 00 85 = o\n",
    "00 00 00 86 =  \n",
    "00 00 00 87 = !\n",
);

fn database() -> SymbolDatabase {
    SymbolDatabase::parse_str(DATABASE)
}

/// Two subgroups with colored subtitles, needs `h` in the database.
fn document(database: &SymbolDatabase) -> FcoDocument {
    let mut document = FcoDocument::new("Subtitle");

    let mut intro = Subgroup::new("Intro");
    let mut hello = Subtitle::new("Hello01", validate_string("Hello!", database).unwrap());
    hello.default_color = Color::rgba(0x20, 0x40, 0x60, 0xFF);
    hello.color_blocks.push(ColorBlock::new(0, 4, Color::white()));
    intro.subtitles.push(hello);
    intro
        .subtitles
        .push(Subtitle::new("Press", validate_string("\\Start\\ \\A\\\nHe", database).unwrap()));

    let mut outro = Subgroup::new("Outro");
    outro.subtitles.push(Subtitle::new("Bye", validate_string("oooh", database).unwrap()));

    document.subgroups.push(intro);
    document.subgroups.push(outro);
    document
}

fn database_with_h() -> SymbolDatabase {
    let mut database = database();
    database.insert("h", 0x88);
    database
}

#[test]
fn test_fco_file_roundtrip() {
    let database = database_with_h();
    let original = document(&database);

    let dir = tempdir().unwrap();
    let path = dir.path().join("Subtitle.fco");
    original.save(&path, &database).unwrap();

    let loaded = FcoDocument::load(&path, &database).unwrap();
    assert_eq!(loaded, original);
    assert_eq!(loaded.text(0, 1).as_deref(), Some("\\Start\\ \\A\\\nHe"));

    let again = dir.path().join("Again.fco");
    loaded.save(&again, &database).unwrap();
    assert_eq!(fs::read(&again).unwrap(), fs::read(&path).unwrap());
}

#[test]
fn test_database_file_inverse_and_first_wins() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fcoDatabase.txt");
    fs::write(&path, format!("{DATABASE}00 00 00 90 = H\n00 00 00 82 = x\n")).unwrap();

    let database = SymbolDatabase::load(&path).unwrap();
    // Each direction keeps its first definition
    assert_eq!(database.encode("H"), Some(0x82));
    assert_eq!(database.decode(0x82).map(Symbol::as_str), Some("H"));
    assert_eq!(database.decode(0x90).map(Symbol::as_str), Some("H"));
    assert_eq!(database.encode("x"), Some(0x82));

    for (symbol, value) in database.iter() {
        if database.decode(value) == Some(symbol) {
            assert_eq!(database.encode(symbol), Some(value));
        }
    }
    assert_eq!(database.encode("\n"), Some(0));
}

#[test]
fn test_escape_tokens_and_subtitle_size() {
    let database = database();
    let symbols = validate_string("\\A\\\\B\\H", &database).unwrap();
    assert_eq!(
        symbols.iter().map(Symbol::as_str).collect::<Vec<_>>(),
        vec!["\\A\\", "\\B\\", "H"]
    );

    let subtitle = Subtitle::new("Size", symbols);
    assert_eq!(subtitle.subtitle_size(), 3);

    assert!(matches!(
        validate_string("H\\Start", &database),
        Err(Error::MalformedEscape { index: 1, .. })
    ));
}

#[test]
fn test_size_fields_in_saved_subtitle() {
    let database = database();
    let mut doc = FcoDocument::new("G");
    doc.subgroups.push(Subgroup::new("S"));
    doc.add_subtitle(0, "L", validate_string("\\A\\He", &database).unwrap());

    let data = serialize_fco(&doc, &database).unwrap();
    // header 12, "G" 8, count 4, "S" 8, count 4, "L" 8
    let count = 44;
    assert_eq!(&data[count..count + 4], &[0, 0, 0, 3]);
    let style = count + 4 + 3 * 4 + 4;
    assert_eq!(&data[style + 4..style + 8], &[0, 0, 0, 2]);
    assert_eq!(&data[style + 0x34..style + 0x38], &[0, 0, 0, 2]);
}

#[test]
fn test_out_of_range_edits_keep_bytes() {
    let database = database_with_h();
    let mut doc = document(&database);
    let before = serialize_fco(&doc, &database).unwrap();

    assert_eq!(doc.delete_subtitle(999, 0), Edit::Ignored);
    assert_eq!(doc.swap_groups(0, 2), Edit::Ignored);
    assert_eq!(doc.remove_color_block(0, 0, 1), Edit::Ignored);
    assert_eq!(doc.modify_color_block(1, 0, 0, ColorBlock::default()), Edit::Ignored);

    assert_eq!(serialize_fco(&doc, &database).unwrap(), before);
}

#[test]
fn test_unknown_value_fails_whole_load() {
    let full = database_with_h();
    let data = serialize_fco(&document(&full), &full).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("Subtitle.fco");
    fs::write(&path, &data).unwrap();

    // "h" is only known to the full database
    let result = FcoDocument::load(&path, &database());
    match result {
        Err(Error::MalformedEncoding { value, location }) => {
            assert_eq!(value, 0x88);
            assert_eq!(location, Location::new(1, 0));
        }
        other => panic!("expected MalformedEncoding, got {other:?}"),
    }
}

#[test]
fn test_failed_save_leaves_target() {
    let database = database_with_h();
    let dir = tempdir().unwrap();
    let path = dir.path().join("Subtitle.fco");

    let mut doc = document(&database);
    doc.save(&path, &database).unwrap();
    let saved = fs::read(&path).unwrap();

    doc.modify_subtitle(1, 0, vec![Symbol::from("Z")]);
    let err = doc.save(&path, &database).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedCharacter {
            index: 0,
            location: Some(Location { group: 1, subtitle: 0 }),
            ..
        }
    ));

    assert_eq!(fs::read(&path).unwrap(), saved);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

fn atlas(characters: &str) -> FontAtlas {
    let textures = vec![TextureRef::new("All_000", 128, 128), TextureRef::new("Buttons", 256, 32)];
    let button_glyphs = (0..BUTTON_GLYPH_COUNT as u32)
        .map(|i| {
            let rect = PixelRect { x: i * 16, y: 0, width: 16, height: 16 };
            GlyphRecord::from_pixels(1, &textures[1], rect, 0)
        })
        .collect();
    let glyphs = characters
        .encode_utf16()
        .zip(0u32..)
        .map(|(c, i)| {
            let rect = PixelRect { x: (i % 8) * 16, y: (i / 8) * 16, width: 12, height: 16 };
            GlyphRecord::from_pixels(0, &textures[0], rect, c)
        })
        .collect();
    FontAtlas {
        textures,
        button_glyphs,
        glyphs,
    }
}

#[test]
fn test_fte_31_records() {
    let data = serialize_fte(&atlas("A")).unwrap();
    let parsed = parse_fte_bytes(&data).unwrap();

    assert_eq!(parsed.button_glyphs.len(), 13);
    assert_eq!(parsed.glyphs.len(), 1);
    assert_eq!(parsed.characters(), "A");
    assert_eq!(parsed.button_texture_index(), Some(1));
    assert_eq!(parsed, atlas("A"));
}

#[test]
fn test_fte_export_import() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("All.fte");
    let original = atlas("Hello, wörld");

    original.export(&path).unwrap();
    let imported = FontAtlas::import(&path).unwrap();
    assert_eq!(imported, original);
    assert!(imported.is_loaded());
}

#[test]
fn test_glyph_index_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("All.fte");
    let characters: String = ('a'..='z').chain('A'..='Z').chain('0'..='9').chain("あいうえおかきくけこさしすせそたちつてとなにぬねのはひふへほま".chars()).collect();
    assert!(characters.chars().count() > INDEX_ALPHABET.len());

    let font = atlas(&characters);
    font.export(&path).unwrap();

    // A database generated for the same font decodes the index
    let database = SymbolDatabase::parse_str(&generate_database_text(&font.characters()));
    let index = FcoDocument::load(dir.path().join("All.fco"), &database).unwrap();

    assert_eq!(index.group_name, "All");
    assert_eq!(index.group_names(), vec!["direct"]);

    let entries = index.subtitles(0).unwrap();
    assert_eq!(entries.len(), characters.chars().count());
    for (k, (entry, c)) in entries.iter().zip(characters.chars()).enumerate() {
        let label = INDEX_ALPHABET.get(k..=k).unwrap_or("?");
        assert_eq!(entry.label, label);
        assert_eq!(entry.text(), c.to_string());
        assert!(entry.color_blocks.is_empty());
    }
}

#[test]
fn test_companion_bytes_match_fco_layout() {
    let font = atlas("xy");
    let data = fcokit::formats::fte::serialize_glyph_index(&font);
    let database = SymbolDatabase::parse_str("00 00 00 82 = x\n00 00 00 83 = y\n");

    let parsed = parse_fco_bytes(&data, &database).unwrap();
    assert_eq!(serialize_fco(&parsed, &database).unwrap(), data);
    assert_eq!(parsed.label(0, 1), Some("1"));
}
