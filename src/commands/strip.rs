use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::Cli;
use crate::codec::WriteMode;
use crate::color::Background;
use crate::config::Config;
use crate::report::{BatchReport, FileReport, Outcome};
use crate::strip::{strip_dir, StripOptions};

pub fn run(
    cli: &Cli,
    dir: Option<&Path>,
    background: Option<Background>,
    no_atomic: bool,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let config = Config::load_or_default(&cli.config)?;
    let config_dir = super::config_dir(&cli.config);

    let dir = super::resolve_path(dir, config_dir, &config.strip.dir);
    let options = StripOptions {
        background: background.unwrap_or(config.background),
        write_mode: WriteMode::from_atomic(config.atomic && !no_atomic),
        dry_run,
    };

    if !json {
        println!(
            "Removing alpha from PNGs in {} (background {})...",
            dir.display(),
            options.background
        );
    }

    let report = strip_dir(&dir, &options)?;

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{out}");
    } else {
        print_report(&report);
        if dry_run {
            println!("\n{} Dry run, no files were written.", "ℹ".blue());
        }
    }

    Ok(())
}

fn print_report(report: &BatchReport) {
    if report.files.is_empty() {
        println!("{} No PNG files found.", "!".yellow());
        return;
    }

    for file in &report.files {
        print_file(file);
    }
    println!("\n{}", report.summary());
}

fn print_file(file: &FileReport) {
    let name = match file.path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => file.path.to_string_lossy(),
    };

    match &file.outcome {
        Outcome::Stripped | Outcome::WouldStrip => {
            println!("  {} {}: {}", "✓".green(), name, file.outcome)
        }
        Outcome::NoAlpha => println!("  {} {}: {}", "-".dimmed(), name, file.outcome),
        Outcome::Failed { .. } => println!(
            "  {} {}: {}",
            "✗".red(),
            name,
            file.outcome.to_string().red()
        ),
    }
}
