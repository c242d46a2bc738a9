use anyhow::Result;
use clap::Parser;
use pngflat::cli::{Cli, Commands};
use pngflat::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Flatten {
            input,
            output,
            background,
        } => commands::flatten::run(&cli, input.as_deref(), output.as_deref(), *background),
        Commands::Strip {
            dir,
            background,
            no_atomic,
            dry_run,
            json,
        } => commands::strip::run(&cli, dir.as_deref(), *background, *no_atomic, *dry_run, *json),
        Commands::Init => commands::init::run(&cli),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
