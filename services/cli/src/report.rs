use crate::infra::{money, parse_decimal, parse_format};
use crate::render::print_report;
use clap::Args;
use rust_decimal::Decimal;
use sollist::config::{AppConfig, OutputFormat};
use sollist::error::AppError;
use sollist::workflows::soll_ist::{
    allocate, CostBucket, Period, SnapshotImporter, SollBreakdown, SollIstEngine,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Portfolio snapshot (JSON) with properties, units, tenants, invoices and payments
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Reporting year
    #[arg(long)]
    pub(crate) year: i32,
    /// First month of the period (1-12)
    #[arg(long, default_value_t = 1)]
    pub(crate) start_month: u32,
    /// Last month of the period (1-12)
    #[arg(long, default_value_t = 12)]
    pub(crate) end_month: u32,
    /// Report a calendar quarter (1-4) instead of a month range
    #[arg(long, conflicts_with_all = ["start_month", "end_month"])]
    pub(crate) quarter: Option<u32>,
    /// Restrict the report to one property
    #[arg(long)]
    pub(crate) property: Option<String>,
    /// Output format: text or json (defaults to SOLLIST_OUTPUT)
    #[arg(long, value_parser = parse_format)]
    pub(crate) format: Option<OutputFormat>,
    /// Include every tenant and vacancy result in the output
    #[arg(long)]
    pub(crate) list_results: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AllocateArgs {
    /// Gross operating costs owed
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub(crate) soll_bk: Decimal,
    /// Gross heating costs owed
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub(crate) soll_hk: Decimal,
    /// Gross base rent owed
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub(crate) soll_miete: Decimal,
    /// Amount received from the tenant
    #[arg(long, value_parser = parse_decimal)]
    pub(crate) haben: Decimal,
}

pub(crate) fn run_report(args: ReportArgs, config: &AppConfig) -> Result<(), AppError> {
    let ReportArgs {
        snapshot,
        year,
        start_month,
        end_month,
        quarter,
        property,
        format,
        list_results,
    } = args;

    let period = match quarter {
        Some(quarter) => Period::quarter(year, quarter)?,
        None => Period::new(year, start_month, end_month)?,
    };
    let portfolio = SnapshotImporter::from_path(&snapshot)?;
    info!(snapshot = %snapshot.display(), period = %period.label(), "loaded portfolio snapshot");

    let engine = match property {
        Some(property_id) => SollIstEngine::new(period).for_property(property_id),
        None => SollIstEngine::new(period),
    };
    let report = engine.compute(&portfolio);

    print_report(
        &report,
        format.unwrap_or(config.report.output),
        list_results,
    )
}

pub(crate) fn run_allocate(args: AllocateArgs) -> Result<(), AppError> {
    let soll = SollBreakdown::from_components(args.soll_bk, args.soll_hk, args.soll_miete);
    let allocation = allocate(&soll, args.haben);
    let saldo = soll.betrag - args.haben;

    println!(
        "Allocation of {} against SOLL {}",
        money(args.haben),
        money(soll.betrag)
    );
    for bucket in CostBucket::statutory_order() {
        println!(
            "- {:<6} SOLL {:>12} | IST {:>12} | offen {:>12}",
            bucket.label(),
            money(soll.get(bucket)),
            money(allocation.get(bucket)),
            money(soll.get(bucket) - allocation.get(bucket))
        );
    }
    println!("Saldo: {}", money(saldo));
    if saldo < Decimal::ZERO {
        println!("Überzahlung: {}", money(-saldo));
    }

    Ok(())
}
