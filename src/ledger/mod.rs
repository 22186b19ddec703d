//! C2 — stock ledger and allocator.
//!
//! Ported from `original_source/grasp/allocation.py`: `allocate_sku_old`
//! (whole-slot preference) and `allocate_sku_new` (fallback split), composed
//! exactly as `allocate_sku_combined` does.

use ahash::AHashMap;

use crate::error::BatchingError;
use crate::types::{Position, Sku};

/// Per-SKU ordered lists of concrete stock positions.
///
/// Invariant: each SKU's `Vec<Position>` is sorted by `qty` descending at
/// construction and never re-sorted afterward — decrements are in place, so
/// the ordering used by the whole-slot/fallback-split policy stays stable
/// across the lifetime of the ledger (spec.md §9, "Sort stability of stock").
#[derive(Debug, Clone, Default)]
pub struct StockLedger {
    positions: AHashMap<Sku, Vec<Position>>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from `(sku, floor, corridor, qty)` rows, grouping by
    /// SKU and sorting each group's positions by `qty` descending. Ties
    /// break by input order (a stable sort), matching spec.md §6.
    pub fn from_rows(rows: impl IntoIterator<Item = (Sku, i64, i64, u64)>) -> Self {
        let mut positions: AHashMap<Sku, Vec<Position>> = AHashMap::default();
        for (sku, floor, corridor, qty) in rows {
            positions
                .entry(sku)
                .or_default()
                .push(Position::new(floor, corridor, qty));
        }
        for slots in positions.values_mut() {
            slots.sort_by(|a, b| b.qty.cmp(&a.qty));
        }
        Self { positions }
    }

    /// Total pieces currently on the ledger for `sku` (sum over its
    /// positions, whether or not zero-quantity positions were retained).
    pub fn total_available(&self, sku: &Sku) -> u64 {
        self.positions
            .get(sku)
            .map(|slots| slots.iter().map(|p| p.qty).sum())
            .unwrap_or(0)
    }

    /// Two-phase allocation policy (spec.md §4.2):
    ///
    /// 1. Whole-slot preference: the first position with `qty >= required`
    ///    is chosen whole, decremented, and returned as a single entry.
    /// 2. Fallback split: otherwise walk positions in order, greedily
    ///    subtracting from each until `required` is satisfied.
    ///
    /// Fails with `InsufficientStock` if the scan ends with a positive
    /// remainder.
    pub fn allocate(&mut self, sku: &Sku, required: u64) -> Result<Vec<Position>, BatchingError> {
        let Some(slots) = self.positions.get_mut(sku) else {
            return Err(BatchingError::InsufficientStock {
                sku: sku.clone(),
                required,
                available: 0,
            });
        };

        if let Some(slot) = slots.iter_mut().find(|p| p.qty >= required) {
            slot.qty -= required;
            return Ok(vec![Position::new(slot.floor, slot.corridor, required)]);
        }

        let mut allocated = Vec::new();
        let mut remaining = required;
        for slot in slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            let taken = slot.qty.min(remaining);
            if taken == 0 {
                continue;
            }
            allocated.push(Position::new(slot.floor, slot.corridor, taken));
            slot.qty -= taken;
            remaining -= taken;
        }

        if remaining > 0 {
            let available: u64 = allocated.iter().map(|p| p.qty).sum();
            return Err(BatchingError::InsufficientStock {
                sku: sku.clone(),
                required,
                available,
            });
        }

        Ok(allocated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_slot_preference() {
        let mut ledger = StockLedger::from_rows([(Sku::new("A"), 1, 3, 10)]);
        let allocated = ledger.allocate(&Sku::new("A"), 5).unwrap();
        assert_eq!(allocated, vec![Position::new(1, 3, 5)]);
        assert_eq!(ledger.total_available(&Sku::new("A")), 5);
    }

    #[test]
    fn fallback_split() {
        // Sorted descending by qty, stored order is [(1,5,4),(1,3,3)]
        // regardless of input order, so the walk takes all 4 from (1,5)
        // before taking the remaining 2 from (1,3).
        let mut ledger = StockLedger::from_rows([
            (Sku::new("A"), 1, 3, 3),
            (Sku::new("A"), 1, 5, 4),
        ]);
        let allocated = ledger.allocate(&Sku::new("A"), 6).unwrap();
        assert_eq!(allocated, vec![Position::new(1, 5, 4), Position::new(1, 3, 2)]);
    }

    #[test]
    fn fallback_split_matches_spec_scenario_2() {
        // Stock sorted descending by qty puts (1,5,4) before (1,3,3).
        // The spec's scenario enumerates positions in input order [(1,3,3),(1,5,4)];
        // ties/ordering of descending sort keep this deterministic since 4 > 3.
        let mut ledger = StockLedger::from_rows([
            (Sku::new("A"), 1, 5, 4),
            (Sku::new("A"), 1, 3, 3),
        ]);
        let allocated = ledger.allocate(&Sku::new("A"), 6).unwrap();
        assert_eq!(allocated, vec![Position::new(1, 5, 4), Position::new(1, 3, 2)]);
    }

    #[test]
    fn insufficient_stock_fails() {
        let mut ledger = StockLedger::from_rows([(Sku::new("A"), 1, 3, 2)]);
        let err = ledger.allocate(&Sku::new("A"), 5).unwrap_err();
        assert!(matches!(err, BatchingError::InsufficientStock { .. }));
    }

    #[test]
    fn unknown_sku_fails() {
        let mut ledger = StockLedger::new();
        let err = ledger.allocate(&Sku::new("Z"), 1).unwrap_err();
        assert!(matches!(err, BatchingError::InsufficientStock { .. }));
    }

    #[test]
    fn ordering_stable_across_decrements() {
        let mut ledger = StockLedger::from_rows([
            (Sku::new("A"), 1, 1, 10),
            (Sku::new("A"), 1, 2, 8),
        ]);
        // First allocation takes the whole-slot at (1,1,10) down to 4.
        ledger.allocate(&Sku::new("A"), 6).unwrap();
        // Second allocation should still see (1,1) before (1,2) despite (1,1)
        // now holding less than (1,2) — order is fixed at construction time.
        let allocated = ledger.allocate(&Sku::new("A"), 4).unwrap();
        assert_eq!(allocated, vec![Position::new(1, 1, 4)]);
    }
}
