use crate::demo::{run_demo, DemoArgs};
use crate::report::{run_allocate, run_report, AllocateArgs, ReportArgs};
use clap::{ArgAction, Parser, Subcommand};
use sollist::config::AppConfig;
use sollist::error::AppError;
use sollist::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "sollist",
    about = "SOLL/IST payment allocation and reconciliation for property portfolios",
    version
)]
struct Cli {
    /// Raise log verbosity (-v engine debug events, -vv everything)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute SOLL/IST for every tenant and vacant unit in a portfolio snapshot
    Report(ReportArgs),
    /// Preview how a single payment is allocated across BK, HK and Miete
    Allocate(AllocateArgs),
    /// Run the engine over a built-in sample portfolio
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    config.telemetry.apply_verbosity(cli.verbose);
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    match cli.command {
        Command::Report(args) => run_report(args, &config),
        Command::Allocate(args) => run_allocate(args),
        Command::Demo(args) => run_demo(args, &config),
    }
}
