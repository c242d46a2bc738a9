use std::path::Path;

use serde::Serialize;

use crate::codec::{self, WriteMode};
use crate::color::Background;
use crate::composite;
use crate::error::Error;

#[derive(Debug, Clone, Copy, Default)]
pub struct FlattenOptions {
    pub background: Background,
    pub write_mode: WriteMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlattenSummary {
    pub width: u32,
    pub height: u32,
    pub had_alpha: bool,
}

/// Composites `input` onto an opaque canvas and writes the result to `output`
/// as PNG. The source file is never modified (unless it is also `output`).
/// If decoding fails nothing is written.
pub fn flatten_file(
    input: &Path,
    output: &Path,
    options: &FlattenOptions,
) -> Result<FlattenSummary, Error> {
    let img = codec::decode(input)?;
    let had_alpha = composite::has_alpha(&img);
    let flat = composite::flatten(&img, options.background);

    codec::encode_png(&flat, output, options.write_mode)?;

    Ok(FlattenSummary {
        width: flat.width(),
        height: flat.height(),
        had_alpha,
    })
}
