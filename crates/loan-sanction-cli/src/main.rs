mod commands;
mod config;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::applicant::ApplicantArgs;
use commands::emi::{EmiArgs, ScheduleArgs};
use commands::sanction::{FeesArgs, SanctionArgs};

/// EMI quotes and provisional loan sanction letters
#[derive(Parser)]
#[command(
    name = "loanctl",
    version,
    about = "EMI quotes and provisional loan sanction letters",
    long_about = "A CLI for pricing personal loans with decimal precision. Computes \
                  reducing-balance EMIs and amortization schedules, validates applicant \
                  details, and assembles provisional sanction letters with QR and share \
                  payloads."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Product configuration file (YAML)
    #[arg(long, env = "LOANCTL_CONFIG", global = true)]
    config: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote the monthly installment and totals for a loan
    Emi(EmiArgs),
    /// Month-by-month reducing-balance repayment schedule
    Schedule(ScheduleArgs),
    /// Validate and clean applicant details
    Applicant(ApplicantArgs),
    /// Processing fee and net disbursal for a loan amount
    Fees(FeesArgs),
    /// Assemble a provisional sanction letter
    Sanction(SanctionArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let product = match config::load_product_config(cli.config.as_deref()) {
        Ok(product) => product,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::emi::run_emi(args),
        Commands::Schedule(args) => commands::emi::run_schedule(args),
        Commands::Applicant(args) => commands::applicant::run_applicant(args),
        Commands::Fees(args) => commands::sanction::run_fees(args, &product),
        Commands::Sanction(args) => commands::sanction::run_sanction(args, &product),
        Commands::Version => {
            println!("loanctl {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
