use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use aid_cli::input::{RawComponents, RawHousehold, RawIncome};
use aid_cli::report::OutputFormat;
use aid_cli::{app, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Energy-assistance eligibility calculator.
///
/// Weighs household members into consumption units, normalizes the reported
/// income and compares the monthly income per unit against the statutory
/// ceiling.
#[derive(Debug, Parser)]
#[command(name = "energy-aid", version, about, long_about = None)]
struct Cli {
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Log filter (e.g. `debug` or `aid_core=trace`). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append log records to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a single household
    Check(CheckArgs),
    /// Check every household in a CSV file
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Age of a household member; repeat once per member, in entry order.
    #[arg(short, long = "age", value_name = "AGE", allow_hyphen_values = true)]
    ages: Vec<String>,

    /// Annual employment income.
    #[arg(long, allow_hyphen_values = true)]
    employment: Option<String>,

    /// Net business income for the tax period.
    #[arg(long, allow_hyphen_values = true)]
    business: Option<String>,

    /// Annual pension income.
    #[arg(long, allow_hyphen_values = true)]
    pension: Option<String>,

    /// Annual service-contract income.
    #[arg(long, allow_hyphen_values = true)]
    service: Option<String>,

    /// Months covered by the tax period (default 12).
    #[arg(long, allow_hyphen_values = true)]
    tax_months: Option<String>,

    /// Months of the decision period (default 12).
    #[arg(long, allow_hyphen_values = true)]
    decision_months: Option<String>,

    /// Pre-aggregated annual household income; replaces the component flags.
    #[arg(
        long,
        allow_hyphen_values = true,
        conflicts_with_all = [
            "employment",
            "business",
            "pension",
            "service",
            "tax_months",
            "decision_months",
        ]
    )]
    total: Option<String>,
}

impl CheckArgs {
    fn into_raw(self) -> RawHousehold {
        let income = match self.total {
            Some(total) => RawIncome::Total(total),
            None => RawIncome::Components(RawComponents {
                employment: self.employment.unwrap_or_default(),
                business: self.business.unwrap_or_default(),
                pension: self.pension.unwrap_or_default(),
                service: self.service.unwrap_or_default(),
                tax_months: self.tax_months.unwrap_or_default(),
                decision_months: self.decision_months.unwrap_or_default(),
            }),
        };

        RawHousehold {
            ages: self.ages,
            income,
        }
    }
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// CSV file with one household per row
    #[arg(short, long)]
    file: PathBuf,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;
    debug!(?cli, "parsed command line");

    let output = match cli.command {
        Command::Check(args) => app::check_household(&args.into_raw(), cli.format)?,
        Command::Batch(args) => app::check_batch_file(&args.file, cli.format)?,
    };

    println!("{output}");
    Ok(())
}
