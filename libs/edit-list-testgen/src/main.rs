use std::path::PathBuf;

use clap::{Parser, Subcommand};
use edit_list_testgen::{DirSink, Naming, ReportSink, StdoutReport};

/// Generates the qtdemux edit list tests and their registrations.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding implementations.gen.cpp and calls.gen.cpp
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
    /// TOML file overriding the naming contract
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Default)]
enum Command {
    /// Write both generated files (default)
    #[default]
    Generate,
    /// Fail if the generated files are missing or out of date
    Check,
    /// Print every combination with its status
    List,
}

fn main() -> miette::Result<()> {
    let _ = tracing_subscriber::fmt::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive("info".parse().expect("invalid filter"))
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let naming = Naming::resolve(cli.config.as_deref())?;
    match cli.command.unwrap_or_default() {
        Command::Generate => {
            edit_list_testgen::generate(
                naming,
                &mut DirSink::new(cli.out_dir),
                &mut StdoutReport,
            )?;
        }
        Command::Check => {
            let summary = edit_list_testgen::check(naming, &cli.out_dir)?;
            StdoutReport.report(&summary.to_string());
        }
        Command::List => {
            for (case, status) in edit_list_testgen::matrix() {
                println!("{case}: {status}");
            }
        }
    }
    Ok(())
}
