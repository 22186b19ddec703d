use std::fmt;

use crate::types::{CaixaId, Sku, WaveClass, WaveId};

/// Fatal error taxonomy for the batching core (spec.md §7).
///
/// `BoxUnassignable` is deliberately absent here: the spec treats it as
/// non-fatal within the search, so it is carried as data
/// (`IterationLog::unassigned_count`, `OrchestratorOutcome::unassigned_boxes`)
/// instead of as an `Err` variant.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchingError {
    /// The allocator could not satisfy a box's demand for `sku`.
    InsufficientStock { sku: Sku, required: u64, available: u64 },
    /// A wave's recorded `total_pieces` disagrees with its box contents.
    PieceSumMismatch {
        wave_class: WaveClass,
        wave_id: WaveId,
        expected: u64,
        found: u64,
    },
    /// The validator found more pieces allocated for a SKU than existed.
    SkuOverUse { sku: Sku, available: u64, used: u64 },
    /// An attempt to non-tentatively add a box that already has an
    /// `assigned_wave`.
    DoubleAssignment { caixa_id: CaixaId },
    /// A box was constructed with `pieces == 0`; spec.md §9 requires
    /// rejecting this at the boundary even though the source never gates
    /// on it.
    ZeroPieceBox { caixa_id: CaixaId },
}

impl fmt::Display for BatchingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchingError::InsufficientStock { sku, required, available } => write!(
                f,
                "insufficient stock for sku {sku}: required {required}, available {available}"
            ),
            BatchingError::PieceSumMismatch { wave_class, wave_id, expected, found } => write!(
                f,
                "piece-sum mismatch in {wave_id} (class {wave_class}): expected {expected}, found {found}"
            ),
            BatchingError::SkuOverUse { sku, available, used } => write!(
                f,
                "sku {sku} over-used: available {available}, used {used}"
            ),
            BatchingError::DoubleAssignment { caixa_id } => {
                write!(f, "box {caixa_id} is already assigned to a wave")
            }
            BatchingError::ZeroPieceBox { caixa_id } => {
                write!(f, "box {caixa_id} has zero pieces")
            }
        }
    }
}

impl std::error::Error for BatchingError {}
