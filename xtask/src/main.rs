use std::fs;
use std::path::{Path, PathBuf};
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use pool_core::input::write_input;
use pool_core::params::DispatchParams;
use pool_core::scenario::DemandScenario;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the ride-pooling dispatch workspace",
    long_about = "A unified CLI for running the dispatcher, generating demand,\n\
                  benchmarks, load tests and CI checks."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dispatcher on an input file
    Run {
        /// Input file in the dispatcher's token format
        input: PathBuf,
        /// Report format passed through to the dispatcher
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write a synthetic demand file
    Generate {
        /// Number of requests
        #[arg(long, default_value_t = 1_000)]
        count: usize,
        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Request times are spread over [0, window]
        #[arg(long, default_value_t = 600.0)]
        window: f64,
        /// Output file path
        #[arg(long, default_value = "demand.txt")]
        output: PathBuf,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Run CI checks (fmt, clippy, tests, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Run load tests (ignored tests in pool_core)
    LoadTest,
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Run benchmarks
    Bench,
    /// Run check + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn generate_demand(count: usize, seed: u64, window: f64, output: &Path) {
    let requests = DemandScenario::default()
        .with_num_requests(count)
        .with_seed(seed)
        .with_request_window(window)
        .generate_requests();
    let params = DispatchParams::default()
        .with_capacity(4)
        .with_speed(1.0)
        .with_max_time_window(5.0)
        .with_max_origin_distance(4.0)
        .with_max_destination_distance(4.0)
        .with_min_efficiency(1.1);
    fs::write(output, write_input(&params, &requests)).expect("failed to write demand file");
    eprintln!("Wrote {count} requests to {}", output.display());
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test pool_core");
    run_cargo(&["test", "-p", "pool_core"]);

    step("Test pool_cli");
    run_cargo(&["test", "-p", "pool_cli"]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&["bench", "--package", "pool_core", "--bench", "performance"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { input, format } => {
            let input = input.to_string_lossy().into_owned();
            run_cargo(&[
                "run",
                "-p",
                "pool_cli",
                "--release",
                "--",
                &input,
                "--format",
                &format,
            ]);
        }
        Commands::Generate {
            count,
            seed,
            window,
            output,
        } => generate_demand(count, seed, window, &output),
        Commands::Bench => ci_bench(),
        Commands::Ci { job } => match job {
            CiJob::Check => ci_check(),
            CiJob::Bench => ci_bench(),
            CiJob::All => {
                ci_check();
                ci_bench();
            }
        },
        Commands::LoadTest => {
            run_cargo(&[
                "test",
                "-p",
                "pool_core",
                "--release",
                "--test",
                "load_tests",
                "--",
                "--ignored",
                "--nocapture",
            ]);
        }
    }
}
