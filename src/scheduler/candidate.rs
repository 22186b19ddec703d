//! Restricted candidate list (RCL) construction and draw, ported from
//! `original_source/grasp/grasp_solver.py::GraspSolver.solve`'s
//! `min_val`/`max_val`/`threshold`/`rcl`/`random.choice(rcl)` block.

use rand::Rng;

/// What a candidate insertion targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateTarget {
    /// Insert into the existing wave at this index in the run's wave list.
    Existing(usize),
    /// Open a new wave.
    New,
}

#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub metric: f64,
    pub target: CandidateTarget,
}

/// Builds the RCL (every candidate within `alpha` of the best metric) and
/// draws one uniformly at random. Returns the index into `candidates`.
///
/// Panics if `candidates` is empty — callers must skip the box instead of
/// calling this when step (e) of spec.md §4.4 found no candidates.
pub fn choose<R: Rng + ?Sized>(candidates: &[Candidate], alpha: f64, rng: &mut R) -> usize {
    assert!(!candidates.is_empty(), "choose() called with no candidates");

    let lo = candidates
        .iter()
        .map(|c| c.metric)
        .fold(f64::INFINITY, f64::min);
    let hi = candidates
        .iter()
        .map(|c| c.metric)
        .fold(f64::NEG_INFINITY, f64::max);
    let threshold = lo + alpha * (hi - lo);

    let rcl: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| c.metric <= threshold)
        .map(|(i, _)| i)
        .collect();

    rcl[rng.gen_range(0..rcl.len())]
}
