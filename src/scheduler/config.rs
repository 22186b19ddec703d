//! C4 configuration. Passed explicitly end to end — no globals (spec.md §9,
//! "Global state avoidance").

/// Fixed wave capacity in pieces (spec.md §6).
pub const WAVE_CAPACITY: u64 = 6000;

/// Knobs for one per-class batching search run.
#[derive(Debug, Clone, Copy)]
pub struct BatchingConfig {
    /// Number of randomized-restart iterations.
    pub iterations: usize,
    /// RCL width in `[0, 1]`; larger widens exploration.
    pub alpha: f64,
    /// Area-term weight in the candidate metric.
    pub w_area: f64,
    /// Wave-count-term weight in the candidate metric.
    pub w_waves: f64,
    /// Optional cap on the number of waves this class's run may open.
    pub max_waves: Option<usize>,
    /// Seed for the per-class RNG stream; `None` means nondeterministic.
    pub rng_seed: Option<u64>,
}

impl Default for BatchingConfig {
    /// Matches `original_source/grasp/grasp_solver.py::GraspSolver.__init__`
    /// defaults: `iterations=1`, `alpha=0.3`, `w_area=1.0`, `w_waves=0.1`.
    fn default() -> Self {
        Self {
            iterations: 1,
            alpha: 0.3,
            w_area: 1.0,
            w_waves: 0.1,
            max_waves: None,
            rng_seed: None,
        }
    }
}
