use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use idcard_inspector::{
    batch::{read_all_nonblank, validate_batch},
    birthdate::current_year,
    check_id, complete_as_of, config,
    menu::{write_batch_report, write_completion_outcome, write_info, write_interrupted, Menu},
    region::load_region_table,
    IdInfo, RegionDirectory, Verdict,
};

#[derive(Parser, Debug)]
#[command(name = "idcard-inspector", version, about = "Validate and decode Chinese resident ID numbers")]
struct Cli {
    /// JSON region table ({"110101": "北京市东城区", ...})
    #[arg(long, value_name = "PATH", env = config::REGIONS_ENV, global = true)]
    regions: Option<PathBuf>,

    /// Print results as JSON (subcommands only)
    #[arg(long, global = true)]
    json: bool,

    /// Without a subcommand the interactive menu starts
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate one or more full 18-character ID numbers
    Validate {
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },
    /// Compute the check character for a 17-digit prefix
    Complete {
        #[arg(value_name = "PREFIX")]
        prefix: String,
    },
    /// Validate ID numbers read from stdin, one per line
    Batch,
}

/// One validated number for --json output
#[derive(Serialize)]
struct ValidationOutput {
    input: String,
    verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    info: Option<IdInfo>,
}

fn main() {
    init_logging();
    install_interrupt_handler();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("❌ 程序发生错误: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn install_interrupt_handler() {
    let installed = ctrlc::set_handler(|| {
        let code = write_interrupted(&mut io::stdout());
        std::process::exit(code);
    });

    if let Err(e) = installed {
        tracing::warn!("Ctrl-C handler not installed: {}", e);
    }
}

fn init_logging() {
    // stderr keeps menu output on stdout clean; RUST_LOG overrides the default
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Exit code on success: 0, or 1 when `complete` rejected its input
fn run() -> Result<i32> {
    let cli = Cli::parse();

    let source = config::region_source(cli.regions);
    let regions = load_region_table(&source)?;
    tracing::info!("Region table ready: {} codes", regions.len());

    // Unlocked: the Ctrl-C handler writes to stdout while the menu blocks on stdin
    let mut out = io::stdout();
    let mut code = 0;

    match cli.command {
        None => {
            let stdin = io::stdin();
            Menu::new(&regions, stdin.lock(), &mut out)
                .run()
                .context("Terminal I/O failed")?;
        }
        Some(Commands::Validate { ids }) => run_validate(&ids, &regions, cli.json, &mut out)?,
        Some(Commands::Complete { prefix }) => {
            code = run_complete(&prefix, &regions, current_year(), cli.json, &mut out)?;
        }
        Some(Commands::Batch) => {
            let ids = read_all_nonblank(io::stdin().lock()).context("Failed to read stdin")?;
            let report = validate_batch(&ids, &regions);
            if cli.json {
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            } else {
                write_batch_report(&mut out, &report)?;
            }
        }
    }

    out.flush()?;
    Ok(code)
}

fn run_validate<W: Write>(ids: &[String], regions: &RegionDirectory, json: bool, out: &mut W) -> Result<()> {
    let year = current_year();
    let results: Vec<ValidationOutput> = ids
        .iter()
        .map(|input| {
            let (verdict, info) = match check_id(input, regions, year) {
                Ok(id) => (Verdict::Valid, Some(id.info_as_of(regions, year))),
                Err(reason) => (Verdict::Invalid(reason), None),
            };
            ValidationOutput {
                input: input.clone(),
                verdict,
                info,
            }
        })
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &results)?;
        writeln!(out)?;
        return Ok(());
    }

    for result in &results {
        let status = if result.verdict.is_valid() { "✅" } else { "❌" };
        writeln!(out, "{} {}: {}", status, result.input, result.verdict.message())?;
        if let Some(info) = &result.info {
            write_info(out, info)?;
        }
    }
    Ok(())
}

/// Bad prefixes are user input errors, not crashes: report and return exit code 1
fn run_complete<W: Write>(
    prefix: &str,
    regions: &RegionDirectory,
    year: i32,
    json: bool,
    out: &mut W,
) -> Result<i32> {
    let outcome = complete_as_of(prefix, regions, year);

    match &outcome {
        Ok(done) if json => {
            serde_json::to_writer_pretty(&mut *out, done)?;
            writeln!(out)?;
        }
        _ => write_completion_outcome(out, &outcome)?,
    }

    Ok(if outcome.is_ok() { 0 } else { 1 })
}

// ============================================================================
// TESTS
// ============================================================================
