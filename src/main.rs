use clap::Parser;
use family_tree::command;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Replays a family command session from a file and writes narration and
/// analysis results to another.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the command stream
    input: PathBuf,

    /// Path the narration and analysis results are written to
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), family_tree::Error> {
    let reader = BufReader::new(File::open(&args.input).map_err(family_tree::Error::Io)?);
    let writer = BufWriter::new(File::create(&args.output).map_err(family_tree::Error::Io)?);
    command::run(reader, writer)
}
