//! Shared primitives for the big-endian asset formats
//!
//! Both `.fco` and `.fte` store integers and floats big-endian and strings as
//! a `u32` length followed by the bytes, padded with `@` up to the next 4-byte
//! boundary.

mod reader;
mod writer;

pub use reader::BinaryReader;
pub use writer::BinaryWriter;

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Padding byte used to align strings to 4 bytes.
pub const STRING_PADDING: u8 = b'@';

/// Read a whole file, mapping a missing file to [`Error::NotFound`].
///
/// [`Error::NotFound`]: crate::Error::NotFound
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => Error::NotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(err),
    })
}

/// Replace `path` with `data` without ever exposing a partially written file.
///
/// The bytes go to a temporary file in the destination directory which is
/// then renamed over the target.
pub fn write_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    write_atomic_all(&[(path.as_ref(), data)])
}

/// Replace several files at once.
///
/// Every file is fully written to its temporary before any target is
/// renamed, so an error while writing leaves all targets untouched.
pub fn write_atomic_all(files: &[(&Path, &[u8])]) -> Result<()> {
    let staged = files
        .iter()
        .map(|&(path, data)| stage(path, data).map(|temp| (temp, path, data.len())))
        .collect::<Result<Vec<_>>>()?;

    for (temp, path, len) in staged {
        temp.persist(path).map_err(|err| Error::Io(err.error))?;
        tracing::debug!("Wrote {} bytes to {}", len, path.display());
    }
    Ok(())
}

fn stage(path: &Path, data: &[u8]) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(data)?;
    temp.flush()?;
    Ok(temp)
}
