//! interdb-runner: builds the drug-interaction lookup database for one locale.
//!
//! Usage:
//!   interdb-runner --input drug_interactions_csv_de.csv --lang de
//!   interdb-runner --config interdb.json --show-logs --json

use anyhow::{Context, Result};
use clap::Parser;
use interdb_core::{
    config::ConverterConfig,
    pipeline::{Converter, RunReport},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "interdb-runner")]
#[command(about = "Convert the drug-interactions CSV into an indexed SQLite database", long_about = None)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Semicolon-delimited interactions file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory that receives the database
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Locale tag naming the output database
    #[arg(short, long)]
    lang: Option<String>,

    /// Value stored in the metadata table
    #[arg(long)]
    metadata_locale: Option<String>,

    /// Rows per committed transaction
    #[arg(long)]
    batch_size: Option<usize>,

    /// Log one progress line per ATC1 group
    #[arg(long)]
    show_logs: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.show_logs { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = build_config(&cli)?;
    let converter = Converter::new(config).context("invalid configuration")?;

    let report = converter.run().context("conversion failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<ConverterConfig> {
    let mut config = match &cli.config {
        Some(path) => ConverterConfig::load(path)?,
        None => ConverterConfig::default(),
    };
    if let Some(input) = &cli.input {
        config.input = input.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(lang) = &cli.lang {
        config.language = lang.clone();
    }
    if let Some(locale) = &cli.metadata_locale {
        config.metadata_locale = locale.clone();
    }
    if let Some(n) = cli.batch_size {
        config.batch_size = n;
    }
    config.show_progress |= cli.show_logs;
    Ok(config)
}

fn print_summary(report: &RunReport) {
    println!("=== INTERACTIONS DB ===");
    println!("  locale:         {}", report.language);
    if let Some(path) = &report.db_path {
        println!("  database:       {}", path.display());
    }
    println!("  started:        {}", report.started_at.to_rfc3339());
    println!("  atc1 keys:      {}", report.groups);
    println!("  records:        {}", report.records);
    println!("  rows inserted:  {}", report.rows_inserted);
    println!("  commits:        {}", report.commits);
    println!("  skipped lines:  {}", report.skipped_lines.len());
    if report.input_unreadable {
        println!("  WARNING: input file could not be read, database is empty");
    }
    if let Some(reason) = &report.interrupted {
        println!("  WARNING: input read stopped early ({reason})");
    }
    println!();
    println!("{}", report.summary_line());
}
