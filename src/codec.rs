use std::io::{Cursor, Write};
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage};
use log::{debug, info};
use tempfile::Builder;

use crate::error::Error;

/// How a finished PNG reaches its destination path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Write into a temporary file next to the target, then rename over it.
    /// The target is never left half-written.
    #[default]
    Atomic,
    /// Truncate and write the target directly.
    Direct,
}

impl WriteMode {
    pub fn from_atomic(atomic: bool) -> Self {
        if atomic {
            WriteMode::Atomic
        } else {
            WriteMode::Direct
        }
    }
}

/// Loads an image from disk. A missing file is reported as a decode failure.
pub fn decode(path: &Path) -> Result<DynamicImage, Error> {
    let img = image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "Decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(img)
}

/// Encodes `img` as PNG bytes in memory.
pub fn png_bytes(img: &RgbImage, path: &Path) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|source| Error::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(buf)
}

/// Encodes `img` as PNG and writes it to `path`.
///
/// Encoding happens fully in memory first, so an encoder failure never
/// touches the file system.
pub fn encode_png(img: &RgbImage, path: &Path, mode: WriteMode) -> Result<(), Error> {
    let bytes = png_bytes(img, path)?;

    match mode {
        WriteMode::Direct => {
            std::fs::write(path, &bytes).map_err(|e| Error::encode_io(path, e))?;
        }
        WriteMode::Atomic => write_atomic(path, &bytes)?,
    }

    info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    // Replace the file a symlink points at, not the link itself.
    let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = new_file_builder()
        .tempfile_in(dir)
        .map_err(|e| Error::encode_io(path, e))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| Error::encode_io(path, e))?;

    // Keep the replaced file's permissions.
    if let Ok(meta) = std::fs::metadata(&target) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| Error::encode_io(path, e))?;
    }

    tmp.persist(&target)
        .map_err(|e| Error::encode_io(path, e.error))?;
    Ok(())
}

/// Temp files default to owner-only; request the same 0o666 (minus umask) a
/// plain create would get.
#[cfg(unix)]
fn new_file_builder() -> Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = Builder::new();
    builder.permissions(std::fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn new_file_builder() -> Builder<'static, 'static> {
    Builder::new()
}
