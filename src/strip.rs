//! Removes the alpha channel from every PNG in a directory, in place.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::codec::{self, WriteMode};
use crate::color::Background;
use crate::composite;
use crate::error::Error;
use crate::report::{BatchReport, Outcome};

#[derive(Debug, Clone, Copy, Default)]
pub struct StripOptions {
    pub background: Background,
    pub write_mode: WriteMode,
    pub dry_run: bool,
}

/// Lists the `.png` files directly inside `dir`, in file system order.
pub fn find_pngs(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    if !dir.is_dir() {
        return Err(Error::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }

    let read_err = |source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png && path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Strips one file. Errors are folded into [`Outcome::Failed`].
pub fn strip_file(path: &Path, options: &StripOptions) -> Outcome {
    match try_strip_file(path, options) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("{e}");
            Outcome::Failed {
                error: e.to_string(),
            }
        }
    }
}

fn try_strip_file(path: &Path, options: &StripOptions) -> Result<Outcome, Error> {
    let img = codec::decode(path)?;

    if !composite::has_alpha(&img) {
        debug!("{} has no alpha channel, skipping", path.display());
        return Ok(Outcome::NoAlpha);
    }

    if options.dry_run {
        return Ok(Outcome::WouldStrip);
    }

    let flat = composite::flatten(&img, options.background);
    codec::encode_png(&flat, path, options.write_mode)?;
    Ok(Outcome::Stripped)
}

/// Strips every PNG in `dir`. Only a missing or unreadable directory is an
/// error; per-file failures are recorded in the report and the pass continues.
pub fn strip_dir(dir: &Path, options: &StripOptions) -> Result<BatchReport, Error> {
    let files = find_pngs(dir)?;
    debug!("Found {} PNG file(s) in {}", files.len(), dir.display());

    let mut report = BatchReport::new(dir.to_path_buf());
    for path in files {
        let outcome = strip_file(&path, options);
        report.push(path, outcome);
    }
    Ok(report)
}
