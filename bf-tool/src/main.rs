//! Main entry point for the bf-tool CLI

use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::{Generator, generate};
use std::io;

use bf_tool::cli::{Cli, Commands};
use bf_tool::commands;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logger; -v/-q override RUST_LOG
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level_filter(cli.verbose, cli.quiet) {
        logger.filter_level(level);
    }
    logger.init();

    match cli.command {
        Commands::Info { file, stats } => commands::info::execute(&file, stats),
        Commands::Validate {
            file,
            lenient,
            max_version,
        } => commands::validate::execute(&file, lenient, max_version),
        Commands::Extract {
            file,
            layer,
            output,
            raw,
        } => commands::extract::execute(&file, &layer, &output, raw),
        Commands::PackCube {
            input_dir,
            output,
            width,
            height,
            format,
            compression_level,
        } => commands::pack_cube::execute(
            &input_dir,
            &output,
            width,
            height,
            format.into(),
            compression_level,
        ),
        Commands::Completions { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(())
        }
    }
}

fn level_filter(verbose: u8, quiet: bool) -> Option<log::LevelFilter> {
    match (verbose, quiet) {
        (0, false) => None,
        (0, true) => Some(log::LevelFilter::Error),
        (1, _) => Some(log::LevelFilter::Info),
        (2, _) => Some(log::LevelFilter::Debug),
        _ => Some(log::LevelFilter::Trace),
    }
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}
