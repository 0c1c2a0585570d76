//! Shoreline classification CLI.
//!
//! Reads coordinates from a CSV or spreadsheet file, classifies each row
//! against a land polygon layer and writes the input back out with a status
//! column.

mod config;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use shorecheck::classify::{Pipeline, METRIC_CRS};
use shorecheck::land::source::load_shapefile;
use shorecheck::land::{build_land, LayerResolver};
use shorecheck::models::ShoreStatus;
use shorecheck::projection::Crs;
use shorecheck::table::{read_table, write_table};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "shorecheck")]
#[command(about = "Classify coordinates as Offshore, Onshore or Inland")]
struct Args {
    /// CSV or spreadsheet (.xlsx, .xls, .ods) with latitude/longitude columns
    #[arg(short, long)]
    input: PathBuf,

    /// Output file, .csv or .xlsx
    #[arg(short, long, default_value = "output.csv")]
    output: PathBuf,

    /// Worksheet to read from a spreadsheet input (default: first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the land polygon shapefiles
    #[arg(long)]
    land_dir: Option<PathBuf>,

    /// Onshore threshold in kilometers
    #[arg(long)]
    buffer_km: Option<f64>,

    /// Zero-based latitude column
    #[arg(long)]
    lat_col: Option<usize>,

    /// Zero-based longitude column
    #[arg(long)]
    lon_col: Option<usize>,

    /// Input has no header row
    #[arg(long)]
    no_headers: bool,

    /// Field delimiter
    #[arg(long)]
    delimiter: Option<char>,

    /// Classify on a single thread
    #[arg(long)]
    sequential: bool,

    /// Write the run summary as JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// CLI flags take precedence over the config file
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.land_dir {
            config.land.dir = dir.clone();
        }
        if let Some(km) = self.buffer_km {
            config.classifier.onshore_buffer_km = km;
        }
        if let Some(col) = self.lat_col {
            config.columns.latitude_index = col;
        }
        if let Some(col) = self.lon_col {
            config.columns.longitude_index = col;
        }
        if self.no_headers {
            config.table.has_headers = false;
        }
        if let Some(sheet) = &self.sheet {
            config.table.sheet_name = Some(sheet.clone());
        }
        if let Some(delimiter) = self.delimiter {
            config.table.delimiter = delimiter;
        }
        if self.sequential {
            config.classifier.parallel = false;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    args.apply(&mut config);

    info!("Shorecheck");
    info!("Input: {}", args.input.display());

    // Load data
    let table = read_table(&args.input, config.columns, &config.table)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let coordinates = table.coordinates();

    // Load land layer
    let resolver = match &config.land.candidates {
        Some(names) => LayerResolver::from_names(names.iter().cloned()),
        None => LayerResolver::default(),
    };
    let layer_path = resolver
        .resolve(&config.land.dir)
        .context("No land polygon shapefiles found. Make sure the land dataset is in the land directory")?;

    let assume_crs = config
        .land
        .assume_crs
        .as_deref()
        .map(Crs::from_code)
        .transpose()?;
    let layer = load_shapefile(&layer_path, assume_crs)
        .with_context(|| format!("Failed to load {}", layer_path.display()))?
        .select_land(&config.land.land_classes);

    let (land, coastline) = build_land(layer, METRIC_CRS)?;

    // Classify
    info!("Classifying points...");
    let pb = ProgressBar::new(coordinates.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )?
            .progress_chars("#>-"),
    );

    let result = Pipeline::new(&land, &coastline, config.classifier.clone())?
        .with_progress(pb)
        .run(&coordinates)?;

    // Save output
    write_table(&args.output, &table, &result.statuses, &config.table)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    result.summary.log();

    if let Some(path) = &args.summary_json {
        let file = File::create(path).context("Failed to create summary file")?;
        serde_json::to_writer_pretty(file, &result.summary)?;
        info!("Summary written to {}", path.display());
    }

    info!("Done! Output saved to {}", args.output.display());

    let buffer_km = config.classifier.onshore_buffer_km;
    println!("\nClassification categories:");
    for status in ShoreStatus::all() {
        println!("- {}: {}", status, status.describe(buffer_km));
    }

    Ok(())
}
