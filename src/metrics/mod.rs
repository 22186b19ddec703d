use serde::Serialize;
use tracing::info;

use crate::orchestrator::BatchingOutcome;
use crate::types::IterationLog;

#[derive(Debug, Serialize)]
struct WaveReport {
    id: usize,
    wave_class: String,
    n_boxes: usize,
    total_pieces: u64,
    area: u64,
}

#[derive(Debug, Serialize)]
struct Report {
    generated_at: i64,
    total_waves: usize,
    avg_area: f64,
    unassigned_boxes: Vec<String>,
    validation_errors: Vec<String>,
    waves: Vec<WaveReport>,
    logs: Vec<IterationLog>,
}

/// Turns an `orchestrator::BatchingOutcome` into a printable or
/// JSON-exportable run report.
pub struct MetricsCollector;

impl MetricsCollector {
    pub fn new() -> Self {
        Self
    }

    fn build_report(&self, outcome: &BatchingOutcome) -> Report {
        Report {
            generated_at: chrono::Utc::now().timestamp(),
            total_waves: outcome.summary.total_waves,
            avg_area: outcome.summary.avg_area,
            unassigned_boxes: outcome.unassigned_boxes.iter().map(|id| id.0.clone()).collect(),
            validation_errors: outcome.errors.iter().map(|e| e.to_string()).collect(),
            waves: outcome
                .waves
                .iter()
                .map(|w| WaveReport {
                    id: w.id.0,
                    wave_class: w.wave_class.0.clone(),
                    n_boxes: w.boxes.len(),
                    total_pieces: w.total_pieces,
                    area: w.area(),
                })
                .collect(),
            logs: outcome.logs.clone(),
        }
    }

    pub fn print_metrics(&self, outcome: &BatchingOutcome) {
        info!("\nBatching Summary:");
        info!("  Waves: {}", outcome.summary.total_waves);
        info!("  Avg Area: {:.2}", outcome.summary.avg_area);
        info!("  Unassigned boxes: {}", outcome.unassigned_boxes.len());
        info!("  Validation errors: {}", outcome.errors.len());
        info!("  Iteration records: {}", outcome.logs.len());
    }

    pub fn export_json(&self, outcome: &BatchingOutcome, path: &str) -> Result<(), std::io::Error> {
        let report = self.build_report(outcome);
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
