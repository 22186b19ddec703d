//! C6 — solution validator. No surviving Python counterpart
//! (`original_source/grasp/validation.py` was emptied by retrieval
//! filtering); grounded directly on spec.md §4.6, in the style of
//! `pevm_opt_2::cli::verify_states` (a free function returning `(ok, errors)`
//! and logging mismatches via `tracing::error!`).

use ahash::AHashMap;

use crate::error::BatchingError;
use crate::ledger::StockLedger;
use crate::types::Sku;
use crate::wave::Wave;

/// Runs both checks of spec.md §4.6 against `waves`, removing empty waves
/// in place, and returns every violation found (it does not stop at the
/// first one, so callers get a complete picture of what is wrong).
pub fn validate(waves: &mut Vec<Wave>, original_ledger: &StockLedger) -> Vec<BatchingError> {
    let mut errors = Vec::new();

    for wave in waves.iter() {
        let expected: u64 = wave.boxes.iter().map(|b| b.pieces).sum();
        if expected != wave.total_pieces {
            let err = BatchingError::PieceSumMismatch {
                wave_class: wave.wave_class.clone(),
                wave_id: wave.id,
                expected,
                found: wave.total_pieces,
            };
            tracing::error!("{err}");
            errors.push(err);
        }
    }

    let mut used_by_sku: AHashMap<Sku, u64> = AHashMap::default();
    for wave in waves.iter() {
        for b in &wave.boxes {
            *used_by_sku.entry(b.sku.clone()).or_insert(0) += b.pieces;
        }
    }
    for (sku, used) in used_by_sku {
        let available = original_ledger.total_available(&sku);
        if used > available {
            let err = BatchingError::SkuOverUse { sku, available, used };
            tracing::error!("{err}");
            errors.push(err);
        }
    }

    waves.retain(|w| !w.boxes.is_empty());

    errors
}
