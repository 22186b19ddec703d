use std::time::Instant;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::generator::WarehouseGenerator;
use crate::metrics::MetricsCollector;
use crate::orchestrator;
use crate::scheduler::BatchingConfig;
use crate::types::{BoxRecord, Sku};

/// On-disk shape for a generated (or hand-built) catalog, read by `run` and
/// written by `generate`. Not part of the core — the batching engine itself
/// never touches the filesystem.
#[derive(Serialize, Deserialize)]
struct CatalogFile {
    boxes: Vec<BoxRecord>,
    stock_rows: Vec<(Sku, i64, i64, u64)>,
}

#[derive(Parser)]
#[command(name = "wavebatch")]
#[command(about = "Warehouse order-batching and picking-area minimizer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Generate {
        #[arg(long, default_value = "500")]
        n_boxes: usize,

        #[arg(long, default_value = "40")]
        n_skus: usize,

        #[arg(long, default_value = "4")]
        n_wave_classes: usize,

        #[arg(long, default_value = "600")]
        max_pieces: u64,

        #[arg(long, default_value = "42")]
        seed: u64,

        #[arg(long, default_value = "catalog.json")]
        output: String,
    },

    Run {
        #[arg(long)]
        input: Option<String>,

        #[arg(long)]
        preset: Option<String>, // "small" | "medium" | "large"

        #[arg(long, default_value = "1")]
        iterations: usize,

        #[arg(long, default_value = "0.3")]
        alpha: f64,

        /// RNG seed; omit for a nondeterministic run (spec.md §6).
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value = "report.json")]
        output: String,
    },

    Benchmark {
        #[arg(long)]
        preset: Option<String>,

        #[arg(long, default_value = "10")]
        iterations: usize,

        #[arg(long, default_value = "bench-report.json")]
        output: String,
    },
}

pub fn handle_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Generate {
            n_boxes,
            n_skus,
            n_wave_classes,
            max_pieces,
            seed,
            output,
        } => handle_generate(n_boxes, n_skus, n_wave_classes, max_pieces, seed, &output),

        Commands::Run { input, preset, iterations, alpha, seed, output } => {
            handle_run(input, preset, iterations, alpha, seed, &output)
        }

        Commands::Benchmark { preset, iterations, output } => handle_benchmark(preset, iterations, &output),
    }
}

fn handle_generate(
    n_boxes: usize,
    n_skus: usize,
    n_wave_classes: usize,
    max_pieces: u64,
    seed: u64,
    output: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let spinner = progress_spinner("generating catalog");
    let generator = WarehouseGenerator::new(n_boxes, n_skus, n_wave_classes, max_pieces, seed);
    let (catalog, stock_rows) = generator.generate();
    spinner.finish_and_clear();

    let file = CatalogFile { boxes: catalog.boxes, stock_rows };
    let json = serde_json::to_string_pretty(&file)?;
    std::fs::write(output, json)?;

    info!("Generated {} boxes to {}", file.boxes.len(), output);
    Ok(())
}

fn load_catalog(input: Option<String>, preset: Option<String>) -> Result<CatalogFile, Box<dyn std::error::Error>> {
    if let Some(path) = input {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    } else {
        let generator = match preset.as_deref() {
            Some("small") => WarehouseGenerator::small(),
            Some("medium") => WarehouseGenerator::medium(),
            Some("large") => WarehouseGenerator::large(),
            Some(other) => return Err(format!("Unknown preset: {other}").into()),
            None => WarehouseGenerator::medium(),
        };
        let (catalog, stock_rows) = generator.generate();
        Ok(CatalogFile { boxes: catalog.boxes, stock_rows })
    }
}

fn handle_run(
    input: Option<String>,
    preset: Option<String>,
    iterations: usize,
    alpha: f64,
    seed: Option<u64>,
    output: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = load_catalog(input, preset)?;
    let config = BatchingConfig { iterations, alpha, rng_seed: seed, ..Default::default() };

    let spinner = progress_spinner("running batching search");
    let start = Instant::now();
    let outcome = orchestrator::run(file.boxes, file.stock_rows, &config)?;
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
    spinner.finish_and_clear();

    info!("Run: {:.2} ms, {} waves, avg area {:.2}", elapsed, outcome.summary.total_waves, outcome.summary.avg_area);

    let collector = MetricsCollector::new();
    collector.print_metrics(&outcome);
    collector.export_json(&outcome, output)?;

    Ok(())
}

fn handle_benchmark(preset: Option<String>, iterations: usize, output: &str) -> Result<(), Box<dyn std::error::Error>> {
    let file = load_catalog(None, preset)?;

    let greedy_config = BatchingConfig { iterations: 1, alpha: 0.0, rng_seed: Some(42), ..Default::default() };
    let start = Instant::now();
    let greedy_outcome = orchestrator::run(file.boxes.clone(), file.stock_rows.clone(), &greedy_config)?;
    let greedy_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    let grasp_config = BatchingConfig { iterations, alpha: 0.3, rng_seed: Some(42), ..Default::default() };
    let start = Instant::now();
    let grasp_outcome = orchestrator::run(file.boxes, file.stock_rows, &grasp_config)?;
    let grasp_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    info!(
        "Greedy: {:.2} ms, {} waves, avg area {:.2}",
        greedy_time_ms, greedy_outcome.summary.total_waves, greedy_outcome.summary.avg_area
    );
    info!(
        "GRASP ({} restarts): {:.2} ms, {} waves, avg area {:.2}",
        iterations, grasp_time_ms, grasp_outcome.summary.total_waves, grasp_outcome.summary.avg_area
    );

    let collector = MetricsCollector::new();
    collector.export_json(&grasp_outcome, output)?;

    Ok(())
}

fn progress_spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    bar.set_message(message);
    bar.enable_steady_tick(std::time::Duration::from_millis(120));
    bar
}
