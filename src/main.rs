use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use fundwatch::cli::{
    handle_analyze_command, handle_ask_command, handle_config_command, handle_expiry_command,
    handle_holidays_command, handle_init_command, handle_working_days_command, parse_date,
    InputArgs,
};
use fundwatch::config::{paths::FundwatchPaths, settings::Settings};
use fundwatch::models::ApiCredential;

#[derive(Parser)]
#[command(
    name = "fundwatch",
    version,
    about = "Appropriation burn-rate dashboard with an AI assistant",
    long_about = "Fundwatch shows OMN/OPN/SCN balances, their expiry dates and how \
                  many months the branch payroll can run on them. Questions about \
                  the figures can be sent to a hosted AI model. Nothing entered in \
                  a session is saved."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard (default)
    #[command(alias = "ui")]
    Tui {
        /// API key for the assistant
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// List the federal holidays for a year (2024 and 2025 only)
    Holidays {
        /// Calendar year
        year: i32,
    },

    /// Count working days between two dates, inclusive
    #[command(name = "working-days")]
    WorkingDays {
        /// Start date (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        start: NaiveDate,
        /// End date (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        end: NaiveDate,
    },

    /// Show when an appropriation expires
    Expiry {
        /// Appropriation code (OMN, OPN, SCN)
        code: String,
        /// Fiscal year of the appropriation
        #[arg(allow_hyphen_values = true)]
        fiscal_year: i32,
    },

    /// Run the analysis once and print the metrics
    Analyze {
        #[command(flatten)]
        inputs: InputArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run the analysis and ask the assistant one question
    Ask {
        /// Question to send
        question: String,
        #[command(flatten)]
        inputs: InputArgs,
        /// API key for the assistant (prompted for when omitted)
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Write a preferences file with the current settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FundwatchPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    if matches!(cli.command, None | Some(Commands::Tui { .. })) {
        init_file_logging(&paths)?;
    } else {
        init_stderr_logging();
    }

    match cli.command {
        None => fundwatch::tui::run_tui(&settings, ApiCredential::default())?,
        Some(Commands::Tui { api_key }) => {
            let credential = api_key.map(ApiCredential::new).unwrap_or_default();
            fundwatch::tui::run_tui(&settings, credential)?;
        }
        Some(Commands::Holidays { year }) => handle_holidays_command(&settings, year)?,
        Some(Commands::WorkingDays { start, end }) => handle_working_days_command(start, end)?,
        Some(Commands::Expiry { code, fiscal_year }) => {
            handle_expiry_command(&settings, &code, fiscal_year)?
        }
        Some(Commands::Analyze { inputs, json }) => {
            handle_analyze_command(&settings, &inputs, json)?
        }
        Some(Commands::Ask {
            question,
            inputs,
            api_key,
        }) => handle_ask_command(&settings, &question, &inputs, api_key)?,
        Some(Commands::Init) => handle_init_command(&paths, &settings)?,
        Some(Commands::Config) => handle_config_command(&paths, &settings)?,
    }

    Ok(())
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env("FUNDWATCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// The dashboard owns the terminal, so logs go to a file instead
fn init_file_logging(paths: &FundwatchPaths) -> Result<()> {
    paths.ensure_directories()?;
    let log_path = paths.log_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
