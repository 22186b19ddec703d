use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete (floor, corridor, quantity) slot. `qty` is non-negative pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub floor: i64,
    pub corridor: i64,
    pub qty: u64,
}

impl Position {
    pub fn new(floor: i64, corridor: i64, qty: u64) -> Self {
        Self { floor, corridor, qty }
    }

    pub fn is_even(&self) -> bool {
        self.corridor % 2 == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(floor={}, corridor={}, qty={})", self.floor, self.corridor, self.qty)
    }
}

/// Opaque SKU identifier. Equality is the only operation the core requires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sku(pub String);

impl Sku {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a box (`caixa_id` in the source).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaixaId(pub String);

impl CaixaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for CaixaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Categorical label partitioning boxes; cross-class mixing is prohibited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaveClass(pub String);

impl WaveClass {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for WaveClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a wave within the list of waves built by one per-class search
/// run. A plain index, never a reference, so a "snapshot" is a cheap clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaveId(pub usize);

impl fmt::Display for WaveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wave#{}", self.0)
    }
}

/// A shippable box: one wave class, one SKU, a fixed piece count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxRecord {
    pub caixa_id: CaixaId,
    pub wave_class: WaveClass,
    pub pieces: u64,
    pub sku: Sku,
    /// Filled in by the allocator; empty until then.
    pub corridors: Vec<Position>,
    pub assigned_wave: Option<WaveId>,
}

impl BoxRecord {
    /// Constructs an unallocated box.
    ///
    /// Fails with `ZeroPieceBox` on `pieces == 0` — the source never gates
    /// against it, but the spec excludes it explicitly and requires
    /// implementers to reject zero at the boundary. `pieces` is
    /// caller-reachable data, so this returns a `Result` rather than
    /// panicking.
    pub fn try_new(
        caixa_id: CaixaId,
        wave_class: WaveClass,
        pieces: u64,
        sku: Sku,
    ) -> Result<Self, crate::error::BatchingError> {
        if pieces == 0 {
            return Err(crate::error::BatchingError::ZeroPieceBox { caixa_id });
        }
        Ok(Self {
            caixa_id,
            wave_class,
            pieces,
            sku,
            corridors: Vec::new(),
            assigned_wave: None,
        })
    }

    pub fn is_allocated(&self) -> bool {
        !self.corridors.is_empty()
    }
}

/// One restart's outcome, logged by the batching search (spec.md §4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationLog {
    pub wave_class: WaveClass,
    pub iteration: usize,
    pub best_avg_area: f64,
    pub n_waves: usize,
    pub n_boxes: usize,
    pub unassigned_count: usize,
}

/// Orchestrator-level run summary (spec.md §6, "Output from the core").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Summary {
    pub total_waves: usize,
    pub avg_area: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_parity() {
        assert!(Position::new(1, 4, 10).is_even());
        assert!(!Position::new(1, 5, 10).is_even());
    }

    #[test]
    fn zero_piece_box_rejected() {
        let err = BoxRecord::try_new(CaixaId::new("c1"), WaveClass::new("X"), 0, Sku::new("A")).unwrap_err();
        assert!(matches!(err, crate::error::BatchingError::ZeroPieceBox { .. }));
    }
}
