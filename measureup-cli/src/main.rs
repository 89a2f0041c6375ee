//! MeasureUp estimator command line.
//!
//! One presentation flow consuming the estimation engine: loads the
//! reference table, drives a session through the six wizard steps
//! non-interactively, and exports the report CSV.

mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use measureup_core::calculations::CalcNotice;
use measureup_core::models::{ImpactDiscountLevel, ValueLevel, ValueType};
use measureup_core::report::build_report;
use measureup_core::resolver::ValueTable;
use measureup_core::session::{SessionState, Step};
use measureup_data::{loader, report_csv};
use rust_decimal::Decimal;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "measureup")]
#[command(version, about = "Estimate the monetised value of activities using MeasureUp values")]
struct Cli {
    /// Path to the reference data CSV
    #[arg(short, long)]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the value names available in the reference data
    Categories,

    /// Run a full estimate and export the report
    Estimate(EstimateArgs),
}

#[derive(clap::Args, Debug)]
struct EstimateArgs {
    /// MeasureUp value name to match
    #[arg(long)]
    category: String,

    /// Level of specificity
    #[arg(long, value_enum, default_value_t = LevelArg::Bronze)]
    level: LevelArg,

    /// Silver differentiation name (Silver level only)
    #[arg(long)]
    silver: Option<String>,

    /// Primary quantity (e.g. people affected, units delivered)
    #[arg(long, default_value_t = 0)]
    unit1: u32,

    /// Duration multiplier (e.g. fraction of a year; 3 months = 0.25)
    #[arg(long, default_value = "1")]
    unit2: Decimal,

    /// Estimate of what would have happened anyway
    #[arg(long, value_enum, default_value_t = DiscountArg::NoDiscount)]
    discount: DiscountArg,

    /// Type of monetised value to report
    #[arg(long, value_enum, default_value_t = TypeArg::Economic)]
    value_type: TypeArg,

    /// Who is affected by the activity
    #[arg(long, default_value = "")]
    stakeholders: String,

    /// Description of the activity
    #[arg(long, default_value = "")]
    activity: String,

    /// The change experienced by stakeholders
    #[arg(long, default_value = "")]
    outcomes: String,

    /// How the outcome will be measured, and from what source
    #[arg(long, default_value = "")]
    indicator_source: String,

    /// Evidence for the chosen impact discount
    #[arg(long, default_value = "")]
    impact_evidence: String,

    /// Write the report CSV here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelArg {
    Bronze,
    Silver,
}

impl From<LevelArg> for ValueLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Bronze => Self::Bronze,
            LevelArg::Silver => Self::Silver,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DiscountArg {
    NoDiscount,
    Low,
    Medium,
    High,
}

impl From<DiscountArg> for ImpactDiscountLevel {
    fn from(arg: DiscountArg) -> Self {
        match arg {
            DiscountArg::NoDiscount => Self::NoDiscount,
            DiscountArg::Low => Self::Low,
            DiscountArg::Medium => Self::Medium,
            DiscountArg::High => Self::High,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TypeArg {
    Economic,
    Fiscal,
    Wellbeing,
    Environmental,
}

impl From<TypeArg> for ValueType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Economic => Self::Economic,
            TypeArg::Fiscal => Self::Fiscal,
            TypeArg::Wellbeing => Self::Wellbeing,
            TypeArg::Environmental => Self::Environmental,
        }
    }
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let table = loader::load_from_file(&cli.data)
        .with_context(|| format!("Failed to load reference data: {}", cli.data.display()))?;
    info!(rows = table.len(), "reference data loaded");

    match cli.command {
        Command::Categories => run_categories(&table),
        Command::Estimate(args) => run_estimate(&table, args),
    }
}

fn run_categories(table: &ValueTable) -> Result<()> {
    for name in table.categories() {
        println!("{name}");
    }
    Ok(())
}

fn run_estimate(
    table: &ValueTable,
    args: EstimateArgs,
) -> Result<()> {
    let mut session = SessionState::new();

    session.go_to(Step::Scope);
    session.stakeholders = args.stakeholders;
    session.activity = args.activity;
    session.outcomes = args.outcomes;

    session.go_to(Step::ValueMatch);
    session.select_value(&args.category, args.level.into(), args.silver);

    let resolution = session.resolve(table);
    if resolution.needs_silver_choice {
        bail!(
            "'{}' requires a Silver differentiation; choose one of: {}",
            args.category,
            table.silver_names(&args.category).join(", ")
        );
    }
    if resolution.silver_fallback {
        info!(
            category = %args.category,
            "no Silver levels available; using the base description and value"
        );
    }
    if resolution.row.is_none() {
        warn!(
            category = %args.category,
            "no reference row matches the selection; derived values will be zero"
        );
    }

    session.go_to(Step::ActivityDetails);
    session.indicator_source = args.indicator_source;
    session.unit1 = args.unit1;
    session.unit2 = args.unit2;
    session.impact_evidence = args.impact_evidence;
    session.discount = args.discount.into();

    session.go_to(Step::Calculation);
    session.value_type = args.value_type.into();

    for notice in &session.derived(table).notices {
        warn!("{}", notice_message(notice));
    }

    session.go_to(Step::Report);
    let report = build_report(&session, table);
    let csv_text = report_csv::to_csv(&report).context("Failed to serialize the report")?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, csv_text)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => print!("{csv_text}"),
    }

    Ok(())
}

fn notice_message(notice: &CalcNotice) -> String {
    match notice {
        CalcNotice::MissingValueColumn => {
            "no monetary value found in the selected row; using 0 as default".to_string()
        }
        CalcNotice::MissingTypeColumn(value_type) => {
            format!(
                "no value found for {}; using 0 as default",
                value_type.as_str()
            )
        }
        CalcNotice::WellbyMethodologyNotApplicable => {
            "no wellbeing data available for this value, or it is not calculated \
             using the WELLBY methodology"
                .to_string()
        }
    }
}
