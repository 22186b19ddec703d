//! C5 — orchestrator. Partitions boxes by wave class, runs each class's
//! batching search independently and in parallel, then concatenates and
//! validates the result. Ported from
//! `original_source/grasp/wave_process.py::process_wave_class_with_limit`
//! (per-class deep-copied ledger, allocate, then solve), fanned out with
//! `rayon`'s `par_iter` over independent per-class units of work.

use ahash::{AHashMap, AHashSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::BatchingError;
use crate::ledger::StockLedger;
use crate::scheduler::{self, BatchingConfig};
use crate::types::{BoxRecord, CaixaId, IterationLog, Sku, Summary, WaveClass, WaveId};
use crate::validator;
use crate::wave::Wave;

/// Full output of one end-to-end batching run.
#[derive(Debug, Clone, Default)]
pub struct BatchingOutcome {
    pub waves: Vec<Wave>,
    pub unassigned_boxes: Vec<CaixaId>,
    pub logs: Vec<IterationLog>,
    pub summary: Summary,
    pub errors: Vec<BatchingError>,
}

/// Runs the complete pipeline (allocation, batching search, validation) for
/// every wave class present in `boxes`, with each class's search fanned out
/// across a `rayon` thread pool. The seed driving every class's RNG stream
/// comes from `config.rng_seed` (spec.md §6): when set, it is combined with
/// each class's position in sorted order to give every class an
/// independent, repeatable stream; when absent, a fresh seed is drawn from
/// OS entropy so the run is genuinely nondeterministic, per spec.md §6
/// ("rng_seed — optional; absence means nondeterministic behavior").
///
/// Returns `Err` immediately if any class's allocation hits
/// `InsufficientStock` or the validator finds an invariant violation — both
/// are fatal per spec.md §7 ("InsufficientStock and all InvariantViolations
/// propagate up and terminate the run"). Only a wave-count-cap
/// `BoxUnassignable` is carried as data (`BatchingOutcome::unassigned_boxes`),
/// never as an error.
pub fn run(
    boxes: Vec<BoxRecord>,
    stock_rows: impl IntoIterator<Item = (Sku, i64, i64, u64)>,
    config: &BatchingConfig,
) -> Result<BatchingOutcome, BatchingError> {
    let base_ledger = StockLedger::from_rows(stock_rows);
    let base_seed = config.rng_seed.unwrap_or_else(|| rand::thread_rng().gen());

    let mut by_class: AHashMap<WaveClass, Vec<BoxRecord>> = AHashMap::default();
    for b in boxes {
        by_class.entry(b.wave_class.clone()).or_default().push(b);
    }

    let mut classes: Vec<(WaveClass, Vec<BoxRecord>)> = by_class.into_iter().collect();
    classes.sort_by(|a, b| a.0 .0.cmp(&b.0 .0));

    let results: Vec<(Vec<Wave>, Vec<IterationLog>, Vec<CaixaId>)> = classes
        .into_par_iter()
        .enumerate()
        .map(|(class_index, (wave_class, class_boxes))| {
            run_one_class(wave_class, class_boxes, &base_ledger, config, base_seed, class_index)
        })
        .collect::<Result<Vec<_>, BatchingError>>()?;

    let mut waves = Vec::new();
    let mut logs = Vec::new();
    let mut unassigned_boxes = Vec::new();
    for (class_waves, class_logs, class_unassigned) in results {
        waves.extend(class_waves);
        logs.extend(class_logs);
        unassigned_boxes.extend(class_unassigned);
    }

    renumber(&mut waves);

    let errors = validator::validate(&mut waves, &base_ledger);
    if let Some(first) = errors.first() {
        tracing::error!("{first}");
        return Err(first.clone());
    }

    let total_waves = waves.len();
    let avg_area = if total_waves > 0 {
        waves.iter().map(|w| w.area() as f64).sum::<f64>() / total_waves as f64
    } else {
        0.0
    };

    tracing::info!(
        total_waves,
        avg_area,
        unassigned = unassigned_boxes.len(),
        "batching run complete"
    );

    Ok(BatchingOutcome {
        waves,
        unassigned_boxes,
        logs,
        summary: Summary { total_waves, avg_area },
        errors,
    })
}

/// Allocates stock for one class's boxes against its own deep copy of the
/// base ledger, then hands the allocated boxes to the batching search.
///
/// Allocation failure is fatal (`InsufficientStock` propagates, spec.md §7);
/// only boxes the wave-count cap left with no feasible wave are carried as
/// `unassigned` data.
fn run_one_class(
    wave_class: WaveClass,
    mut class_boxes: Vec<BoxRecord>,
    base_ledger: &StockLedger,
    config: &BatchingConfig,
    base_seed: u64,
    class_index: usize,
) -> Result<(Vec<Wave>, Vec<IterationLog>, Vec<CaixaId>), BatchingError> {
    let mut ledger = base_ledger.clone();

    for b in class_boxes.iter_mut() {
        let positions = ledger.allocate(&b.sku, b.pieces)?;
        b.corridors = positions;
    }

    let assignable_ids: AHashSet<CaixaId> = class_boxes.iter().map(|b| b.caixa_id.clone()).collect();

    let seed = base_seed.wrapping_add(class_index as u64);
    let mut rng = StdRng::seed_from_u64(seed);
    let (waves, logs) = scheduler::run_class(class_boxes, wave_class, config, &mut rng);

    let placed: AHashSet<CaixaId> = waves
        .iter()
        .flat_map(|w| w.boxes.iter().map(|b| b.caixa_id.clone()))
        .collect();
    let unassigned: Vec<CaixaId> = assignable_ids.difference(&placed).cloned().collect();

    Ok((waves, logs, unassigned))
}

/// Per-class searches each number their waves from zero; give the
/// concatenation of all classes' waves globally unique ids and keep every
/// box's back-pointer consistent with its wave's new id.
fn renumber(waves: &mut [Wave]) {
    for (new_id, wave) in waves.iter_mut().enumerate() {
        wave.id = WaveId(new_id);
        for b in wave.boxes.iter_mut() {
            b.assigned_wave = Some(wave.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CaixaId;

    fn row(sku: &str, floor: i64, corridor: i64, qty: u64) -> (Sku, i64, i64, u64) {
        (Sku::new(sku), floor, corridor, qty)
    }

    fn sample_box(id: &str, class: &str, pieces: u64, sku: &str) -> BoxRecord {
        BoxRecord::try_new(CaixaId::new(id), WaveClass::new(class), pieces, Sku::new(sku)).unwrap()
    }

    #[test]
    fn splits_by_class_and_renumbers_waves_uniquely() {
        let boxes = vec![
            sample_box("a1", "A", 10, "X"),
            sample_box("a2", "A", 10, "X"),
            sample_box("b1", "B", 10, "Y"),
        ];
        let stock = vec![row("X", 1, 1, 100), row("Y", 1, 2, 100)];
        let config = BatchingConfig { iterations: 1, rng_seed: Some(7), ..Default::default() };
        let outcome = run(boxes, stock, &config).unwrap();

        let mut ids: Vec<usize> = outcome.waves.iter().map(|w| w.id.0).collect();
        ids.sort_unstable();
        let expected: Vec<usize> = (0..outcome.waves.len()).collect();
        assert_eq!(ids, expected);
        assert!(outcome.errors.is_empty());
        assert!(outcome.unassigned_boxes.is_empty());
    }

    #[test]
    fn insufficient_stock_is_fatal() {
        let boxes = vec![sample_box("a1", "A", 500, "X")];
        let stock = vec![row("X", 1, 1, 10)];
        let config = BatchingConfig { rng_seed: Some(1), ..Default::default() };
        let err = run(boxes, stock, &config).unwrap_err();

        assert!(matches!(err, BatchingError::InsufficientStock { .. }));
    }

    #[test]
    fn summary_matches_final_wave_list() {
        let boxes = vec![sample_box("a1", "A", 10, "X")];
        let stock = vec![row("X", 1, 1, 100)];
        let config = BatchingConfig { rng_seed: Some(3), ..Default::default() };
        let outcome = run(boxes, stock, &config).unwrap();

        assert_eq!(outcome.summary.total_waves, outcome.waves.len());
    }

    #[test]
    fn same_seed_is_deterministic_across_runs() {
        let make_boxes = || {
            vec![
                sample_box("a1", "A", 4000, "X"),
                sample_box("a2", "A", 4000, "X"),
                sample_box("a3", "A", 4000, "X"),
            ]
        };
        let stock = vec![row("X", 1, 1, 20000)];
        let config = BatchingConfig {
            iterations: 4,
            alpha: 0.5,
            rng_seed: Some(99),
            ..Default::default()
        };

        let out1 = run(make_boxes(), stock.clone(), &config).unwrap();
        let out2 = run(make_boxes(), stock, &config).unwrap();
        assert_eq!(out1.summary.total_waves, out2.summary.total_waves);
        assert_eq!(out1.waves.len(), out2.waves.len());
    }

    #[test]
    fn absent_seed_still_produces_a_valid_run() {
        let boxes = vec![sample_box("a1", "A", 10, "X")];
        let stock = vec![row("X", 1, 1, 100)];
        let config = BatchingConfig { rng_seed: None, ..Default::default() };
        let outcome = run(boxes, stock, &config).unwrap();

        assert_eq!(outcome.summary.total_waves, 1);
    }
}
