//! `pool_dispatch`: reads dispatch parameters and requests, forms pooled
//! trips, replays them and prints one line per completed trip.

use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use pool_core::dispatch::{run_dispatch, DispatchReport};
use pool_core::error::InputError;
use pool_core::input::{read_input, DispatchInput};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pool_dispatch",
    about = "Ride-pooling dispatch simulation",
    long_about = "Groups transport requests into shared trips, replays their\n\
                  pickups and dropoffs in time order and reports each trip\n\
                  in completion order."
)]
struct Cli {
    /// Input file (standard input when omitted)
    input: Option<PathBuf>,
    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `completion distance stops (x y)+`, two decimals
    Text,
    /// Full report as JSON
    Json,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_input(path: Option<&Path>) -> Result<DispatchInput, InputError> {
    match path {
        Some(path) => read_input(File::open(path)?),
        None => read_input(io::stdin().lock()),
    }
}

fn render(report: &DispatchReport, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(report)?;
            out.push('\n');
            Ok(out)
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let input = load_input(cli.input.as_deref())?;
    let report = run_dispatch(input)?;
    let output = render(&report, cli.format)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "dispatch failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const SAMPLE: &str = "4 1 100 100 100 0\n2\n0 0 0 0 10 0\n1 1 0 0 10 0\n";

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_stdin_and_text() {
        let cli = Cli::try_parse_from(["pool_dispatch"]).expect("no args");
        assert!(cli.input.is_none());
        assert_eq!(cli.format, OutputFormat::Text);

        let cli = Cli::try_parse_from(["pool_dispatch", "demand.txt", "--format", "json"])
            .expect("path and format");
        assert_eq!(cli.input.as_deref(), Some(Path::new("demand.txt")));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn loads_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write sample");

        let input = load_input(Some(file.path())).expect("load");
        assert_eq!(input.requests.len(), 2);
        assert_eq!(input.params.capacity, 4);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_input(Some(&dir.path().join("missing.txt"))).expect_err("missing");
        assert!(matches!(err, InputError::Io(_)));
    }

    #[test]
    fn renders_text_and_json() {
        let input = pool_core::input::parse_input(SAMPLE).expect("input");
        let report = run_dispatch(input).expect("run");

        let text = render(&report, OutputFormat::Text).expect("text");
        assert_eq!(text, "10.00 10.00 4 0.00 0.00 0.00 0.00 10.00 0.00 10.00 0.00\n");

        let json = render(&report, OutputFormat::Json).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["summary"]["trips"], 1);
        assert_eq!(value["trips"][0]["stops"].as_array().map(Vec::len), Some(4));
        assert_eq!(value["trips"][0]["request_ids"][1], 1);
    }
}
