use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tax_core::{BracketTable, Gender, ProgressiveTax, ScenarioComposer};
use tax_data::{BracketTableLoader, Report, ScenarioFile};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Singapore resident income tax calculator.
///
/// Reads a taxpayer scenario from TOML, derives every relief, and prints the
/// tax payable with and without a top-up relief.
#[derive(Debug, Parser)]
#[command(name = "sg-tax")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the TOML scenario file
    #[arg(short, long)]
    scenario: PathBuf,

    /// CSV bracket table to use instead of the built-in resident rates
    #[arg(short, long)]
    brackets: Option<PathBuf>,

    /// Top-up relief, overriding `top_up` in the scenario file
    #[arg(short, long)]
    top_up: Option<Decimal>,

    /// Gender, overriding the scenario file (`male`, `female`, `m` or `f`)
    #[arg(short, long, value_parser = parse_gender)]
    gender: Option<Gender>,

    /// Print the per-band split of the tax
    #[arg(long, default_value_t = false)]
    breakdown: bool,
}

fn parse_gender(s: &str) -> Result<Gender, String> {
    Gender::parse(s).ok_or_else(|| format!("unknown gender '{s}', expected male or female"))
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    debug!(?cli, "parsed CLI arguments");

    let loaded;
    let table = match &cli.brackets {
        Some(path) => {
            loaded = BracketTableLoader::load_from_file(path)
                .with_context(|| format!("Failed to load brackets: {}", path.display()))?;
            info!(path = %path.display(), bands = loaded.len(), "using custom bracket table");
            &loaded
        }
        None => BracketTable::singapore(),
    };

    let mut scenario = ScenarioFile::load_from_file(&cli.scenario)
        .with_context(|| format!("Failed to load scenario: {}", cli.scenario.display()))?;
    if let Some(top_up) = cli.top_up {
        scenario = scenario.with_top_up(top_up);
    }
    if let Some(gender) = cli.gender {
        scenario.profile.gender = gender;
    }

    let evaluation = scenario.evaluate(&ScenarioComposer::new(table));
    info!(
        tax_payable = %evaluation.outcome.tax_payable,
        tax_savings = %evaluation.outcome.tax_savings,
        "scenario evaluated"
    );

    let mut report = Report::new(&scenario, &evaluation);
    if cli.breakdown {
        let breakdown = ProgressiveTax::new(table).breakdown(evaluation.outcome.chargeable_income);
        report = report.with_breakdown(breakdown);
    }

    print!("{report}");

    Ok(())
}
