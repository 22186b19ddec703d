//! C4 — batching search: a randomized greedy construction with a restricted
//! candidate list, run over several restarts. Ported from
//! `original_source/grasp/grasp_solver.py::GraspSolver.solve` (and
//! `original_source/grasp/grasp.py`, its free-function sibling, read to
//! resolve the double-assignment ambiguity spec.md §9 calls out).

use rand::Rng;

use crate::scheduler::candidate::{choose, Candidate, CandidateTarget};
use crate::scheduler::config::{BatchingConfig, WAVE_CAPACITY};
use crate::types::{BoxRecord, IterationLog, WaveClass, WaveId};
use crate::wave::Wave;

/// Runs the GRASP-style batching search for one wave class's already
/// allocated boxes (`box.corridors` populated by the allocator).
///
/// Returns the best-over-restarts wave list and one log record per
/// iteration.
pub fn run_class<R: Rng + ?Sized>(
    mut boxes: Vec<BoxRecord>,
    wave_class: WaveClass,
    config: &BatchingConfig,
    rng: &mut R,
) -> (Vec<Wave>, Vec<IterationLog>) {
    // Boxes touching more positions go first, so simpler boxes can slot into
    // the corridors already opened (spec.md §4.4, "Ordering").
    boxes.sort_by(|a, b| b.corridors.len().cmp(&a.corridors.len()));

    let mut best_solution: Option<Vec<Wave>> = None;
    let mut best_avg_area = f64::INFINITY;
    let mut logs = Vec::with_capacity(config.iterations.max(1));

    for iteration in 1..=config.iterations {
        for b in boxes.iter_mut() {
            b.assigned_wave = None;
        }

        let mut waves: Vec<Wave> = Vec::new();
        let mut unassigned_count = 0usize;

        for i in 0..boxes.len() {
            if boxes[i].assigned_wave.is_some() {
                continue;
            }

            let current_waves_count = waves.len();
            let mut candidates: Vec<Candidate> = Vec::new();

            let feasible: Vec<usize> = waves
                .iter()
                .enumerate()
                .filter(|(_, w)| {
                    w.wave_class == wave_class && w.total_pieces + boxes[i].pieces <= WAVE_CAPACITY
                })
                .map(|(idx, _)| idx)
                .collect();

            for wi in feasible {
                waves[wi]
                    .add_box(&mut boxes[i], true)
                    .expect("tentative add_box never fails");
                let new_area = waves[wi].area() as f64;
                waves[wi].remove_box(&mut boxes[i], true);
                let metric = config.w_area * new_area + config.w_waves * current_waves_count as f64;
                candidates.push(Candidate { metric, target: CandidateTarget::Existing(wi) });
            }

            let can_create_new = config.max_waves.map_or(true, |m| current_waves_count < m);
            let mut provisional_new = None;
            if can_create_new {
                let mut new_wave = Wave::new(WaveId(current_waves_count), wave_class.clone());
                new_wave
                    .add_box(&mut boxes[i], false)
                    .expect("box is unassigned before a provisional add");
                let metric =
                    config.w_area * new_wave.area() as f64 + config.w_waves * (current_waves_count + 1) as f64;
                candidates.push(Candidate { metric, target: CandidateTarget::New });
                provisional_new = Some(new_wave);
            }

            if candidates.is_empty() {
                unassigned_count += 1;
                continue;
            }

            let chosen = candidates[choose(&candidates, config.alpha, rng)];
            match chosen.target {
                CandidateTarget::New => {
                    waves.push(provisional_new.take().expect("new candidate has a provisional wave"));
                }
                CandidateTarget::Existing(wi) => {
                    // The provisional wave built above, if any, already set
                    // box.assigned_wave. Roll that back before committing to
                    // the chosen existing wave, or its add_box would
                    // spuriously observe a double assignment (spec.md §9).
                    if let Some(mut discarded) = provisional_new.take() {
                        discarded.remove_box(&mut boxes[i], false);
                    }
                    waves[wi]
                        .add_box(&mut boxes[i], false)
                        .expect("box is unassigned after provisional rollback");
                }
            }
        }

        let total_area: u64 = waves.iter().map(|w| w.area()).sum();
        let n_waves = waves.len();
        let avg_area = if n_waves > 0 {
            total_area as f64 / n_waves as f64
        } else {
            f64::INFINITY
        };

        if avg_area < best_avg_area {
            best_avg_area = avg_area;
            best_solution = Some(waves.clone());
        }

        logs.push(IterationLog {
            wave_class: wave_class.clone(),
            iteration,
            best_avg_area,
            n_waves,
            n_boxes: boxes.len(),
            unassigned_count,
        });

        tracing::debug!(
            class = %wave_class,
            iteration,
            n_waves,
            unassigned_count,
            best_avg_area,
            "completed GRASP restart"
        );
    }

    (best_solution.unwrap_or_default(), logs)
}
