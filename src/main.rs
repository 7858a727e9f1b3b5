use std::path::PathBuf;

use anyhow::{Context, Result};
use arrow::util::pretty::pretty_format_batches;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use launch_dash::{ChartSeries, Dashboard, ToRecordBatch};

/// Answer launch-dashboard chart queries from the command line.
#[derive(Parser, Debug)]
#[command(name = "launch-dash")]
#[command(about = "Success-rate and payload queries over launch records")]
struct Args {
    /// Launch records file (.csv, .json or .parquet)
    data: PathBuf,

    /// Output format for chart series
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List launch-site dropdown options
    Sites,
    /// Print the payload slider bounds
    Bounds,
    /// Pie-chart series: success rate per site, or outcome counts for one site
    Pie {
        #[arg(long, default_value = "ALL")]
        site: String,
    },
    /// Scatter-chart series: payload vs. outcome within a payload range
    Scatter {
        #[arg(long, default_value = "ALL")]
        site: String,
        /// Lower payload bound in kg (defaults to the dataset minimum)
        #[arg(long)]
        min: Option<f64>,
        /// Upper payload bound in kg (defaults to the dataset maximum)
        #[arg(long)]
        max: Option<f64>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Table,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let dashboard = Dashboard::open(&args.data)
        .with_context(|| format!("loading launch records from {}", args.data.display()))?;

    match args.command {
        Command::Sites => print_json(&dashboard.site_options()),
        Command::Bounds => print_json(&dashboard.payload_bounds()),
        Command::Pie { site } => print_series(&dashboard.aggregate(&site), args.format),
        Command::Scatter { site, min, max } => {
            let [lo, hi] = dashboard.default_range();
            let range = [min.unwrap_or(lo), max.unwrap_or(hi)];
            log::info!("scatter for site {site} over [{}, {}] kg", range[0], range[1]);
            print_series(&dashboard.filter(&site, range), args.format)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_series<R>(series: &ChartSeries<R>, format: Format) -> Result<()>
where
    R: Serialize,
    ChartSeries<R>: ToRecordBatch,
{
    match format {
        Format::Json => print_json(series),
        Format::Table => {
            let batch = series.to_record_batch().context("building result table")?;
            println!("{}", pretty_format_batches(&[batch])?);
            Ok(())
        }
    }
}
