pub mod candidate;
pub mod config;
pub mod grasp;

pub use candidate::{Candidate, CandidateTarget};
pub use config::{BatchingConfig, WAVE_CAPACITY};
pub use grasp::run_class;
