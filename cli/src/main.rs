mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser};
use monieshop_core::{
    parse_record_line, AnalyticsService, FileRecordSource, PeriodReportUseCase, SalesPeriod,
};
use render::OutputFormat;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "monieshop")]
#[command(about = "Sales analytics over one record file per day", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Used when no subcommand is given
    #[command(flatten)]
    report: ReportArgs,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Aggregate the daily record files of a period into a report
    Report(ReportArgs),
    /// Decode a single record line and print it as JSON
    Parse {
        line: String,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
struct ReportArgs {
    /// Directory holding the <yyyy-MM-dd>.txt files (default: current directory)
    #[arg(long, env = "MONIESHOP_DATA_DIR")]
    data_dir: Option<PathBuf>,
    /// First day of the period (default: 2025-01-01)
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Number of days in the period (default: 365)
    #[arg(long)]
    days: Option<u32>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Cli {
    /// The command to run; a bare invocation is a report with the top-level args.
    fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Report(self.report))
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("monieshop=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_report(args: ReportArgs) -> Result<()> {
    let defaults = SalesPeriod::default();
    let period = SalesPeriod::new(
        args.start.unwrap_or(defaults.start),
        args.days.unwrap_or(defaults.days),
    )?;

    let source = FileRecordSource::new(args.data_dir)?;
    tracing::info!(dir = %source.base_dir().display(), start = %period.start, days = period.days, "building report");

    let analytics = AnalyticsService::new();
    let result = PeriodReportUseCase::new(&source, &analytics)
        .build(&period)
        .context("Aggregation aborted")?;

    eprint!("{}", render::render_failures(&result.failures));
    println!("{}", render::render(&result, args.format)?);
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();

    match Cli::parse().into_command() {
        Commands::Report(args) => run_report(args)?,
        Commands::Parse { line } => {
            let record = parse_record_line(&line)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}
