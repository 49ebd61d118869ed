#[cfg(not(feature = "cli"))]
compile_error!("The `polar` binary requires the `cli` feature. Build with `--features cli`.");

use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::process;

use tracing_subscriber::EnvFilter;

use polar::cli;
use polar::cli::app::{Cli, ColorMode};
use polar::PolarError;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --quiet
    let level = if cli.quiet { "warn" } else { "debug" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,polar={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .ok(); // Ignore if already initialized
    }

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {} // colored auto-detects tty
    }

    let writer_result: Result<Box<dyn Write>, PolarError> = match &cli.output {
        Some(path) => File::create(path)
            .map(|f| Box::new(f) as Box<dyn Write>)
            .map_err(|e| PolarError::Io(format!("Cannot create {}: {}", path, e))),
        None => Ok(Box::new(std::io::stdout()) as Box<dyn Write>),
    };

    let mut writer = match writer_result {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = match (cli.file, cli.dump) {
        (Some(file), _) => cli::file::execute(
            &cli::file::FileOptions {
                file,
                json: cli.json,
            },
            &mut writer,
        ),
        (None, Some(dump)) => cli::dump::execute(
            &cli::dump::DumpOptions {
                dump,
                json: cli.json,
                threads: cli.threads,
            },
            &mut writer,
        )
        .map(|_| ()),
        (None, None) => Err(PolarError::Argument(
            "one of --file or --dump is required".to_string(),
        )),
    };

    if let Err(e) = result.and_then(|_| writer.flush().map_err(|e| PolarError::Io(e.to_string()))) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
