use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use fund_screener::data::loader;
use fund_screener::export;
use fund_screener::{run, RankThresholds, ScreenRequest};

// ---------------------------------------------------------------------------
// CLI: the boundary collaborator feeding bytes/parameters to the pipeline
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "fund-screener")]
#[command(about = "Screen fund performance exports by classification and percentile-rank cutoffs")]
#[command(version)]
struct Cli {
    /// Path to the .xlsx performance export
    workbook: PathBuf,

    /// List the worksheets in the workbook and exit
    #[arg(long)]
    list_sheets: bool,

    /// Worksheet to screen (e.g. "境內(TWD計價) -  ")
    #[arg(long, required_unless_present = "list_sheets")]
    sheet: Option<String>,

    /// Fund classification to filter within (exact match, e.g. "股票型")
    #[arg(long, required_unless_present = "list_sheets")]
    classification: Option<String>,

    /// Keep the best N% by 1M rank (100 = no cutoff)
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(..=100))]
    rank_1m: u8,
    /// Keep the best N% by 3M rank
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(..=100))]
    rank_3m: u8,
    /// Keep the best N% by 6M rank
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(..=100))]
    rank_6m: u8,
    /// Keep the best N% by 1Y rank
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(..=100))]
    rank_1y: u8,
    /// Keep the best N% by 2Y rank
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(..=100))]
    rank_2y: u8,
    /// Keep the best N% by 3Y rank
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(..=100))]
    rank_3y: u8,
    /// Keep the best N% by 5Y rank
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(..=100))]
    rank_5y: u8,
    /// Keep the best N% by 10Y rank
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(..=100))]
    rank_10y: u8,

    /// Directory the export CSV is written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Format of the ranks view printed to stdout
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Print results only, skip the export file
    #[arg(long)]
    no_export: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let bytes = fs::read(&cli.workbook)
        .with_context(|| format!("reading workbook {}", cli.workbook.display()))?;

    if cli.list_sheets {
        for name in loader::sheet_names(&bytes)? {
            println!("{name}");
        }
        return Ok(());
    }

    // Both present unless --list-sheets (clap enforces it).
    let request = ScreenRequest {
        sheet_name: cli.sheet.clone().unwrap_or_default(),
        classification: cli.classification.clone().unwrap_or_default(),
        thresholds: RankThresholds {
            m1: cli.rank_1m,
            m3: cli.rank_3m,
            m6: cli.rank_6m,
            y1: cli.rank_1y,
            y2: cli.rank_2y,
            y3: cli.rank_3y,
            y5: cli.rank_5y,
            y10: cli.rank_10y,
        },
    };

    let outcome = run(&bytes, &request)?;

    match cli.format {
        Format::Csv => export::write_csv(&outcome.ranks, io::stdout().lock(), false)?,
        Format::Json => println!("{}", export::to_json(&outcome.ranks)?),
    }

    if !cli.no_export {
        let path = export::export_to_dir(&outcome.detail, &request.classification, &cli.out_dir)?;
        eprintln!("exported {} funds to {}", outcome.detail.len(), path.display());
    }

    Ok(())
}
