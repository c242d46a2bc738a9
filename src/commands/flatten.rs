use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::Cli;
use crate::codec::WriteMode;
use crate::color::Background;
use crate::config::Config;
use crate::flatten::{flatten_file, FlattenOptions};

pub fn run(
    cli: &Cli,
    input: Option<&Path>,
    output: Option<&Path>,
    background: Option<Background>,
) -> Result<()> {
    let config = Config::load_or_default(&cli.config)?;
    let config_dir = super::config_dir(&cli.config);

    let input = super::resolve_path(input, config_dir, &config.flatten.input);
    let output = super::resolve_path(output, config_dir, &config.flatten.output);
    let options = FlattenOptions {
        background: background.unwrap_or(config.background),
        write_mode: WriteMode::from_atomic(config.atomic),
    };

    println!(
        "Flattening {} onto {}...",
        input.display(),
        options.background
    );

    let summary = flatten_file(&input, &output, &options)
        .with_context(|| format!("Failed to flatten {}", input.display()))?;

    let note = if summary.had_alpha {
        "alpha composited"
    } else {
        "no alpha channel, copied"
    };
    println!(
        "{} Saved {} ({}x{}, {})",
        "✓".green(),
        output.display(),
        summary.width,
        summary.height,
        note
    );
    Ok(())
}
