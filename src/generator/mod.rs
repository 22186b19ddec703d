use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{BoxRecord, CaixaId, Sku, WaveClass};

/// A generated batch of unallocated boxes, ready for `orchestrator::run`.
pub struct BoxCatalog {
    pub boxes: Vec<BoxRecord>,
}

/// Synthesizes a box catalog plus a stock ledger sized to cover it, for
/// demos and benchmarking without any real warehouse input file.
pub struct WarehouseGenerator {
    pub n_boxes: usize,
    pub n_skus: usize,
    pub n_wave_classes: usize,
    pub max_pieces: u64,
    pub seed: u64,
}

impl WarehouseGenerator {
    pub fn new(n_boxes: usize, n_skus: usize, n_wave_classes: usize, max_pieces: u64, seed: u64) -> Self {
        Self {
            n_boxes,
            n_skus,
            n_wave_classes,
            max_pieces,
            seed,
        }
    }

    pub fn generate(&self) -> (BoxCatalog, Vec<(Sku, i64, i64, u64)>) {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let skus: Vec<Sku> = (0..self.n_skus.max(1)).map(|i| Sku::new(format!("SKU-{i}"))).collect();
        let wave_classes: Vec<WaveClass> = (0..self.n_wave_classes.max(1))
            .map(|i| WaveClass::new(format!("WC-{i}")))
            .collect();

        tracing::info!(
            n_boxes = self.n_boxes,
            n_skus = self.n_skus,
            n_wave_classes = self.n_wave_classes,
            seed = self.seed,
            "generating synthetic warehouse catalog"
        );

        let mut boxes = Vec::with_capacity(self.n_boxes);
        let mut demand: ahash::AHashMap<Sku, u64> = ahash::AHashMap::default();

        for i in 0..self.n_boxes {
            let sku = skus[rng.gen_range(0..skus.len())].clone();
            let wave_class = wave_classes[rng.gen_range(0..wave_classes.len())].clone();
            let pieces = rng.gen_range(1..=self.max_pieces.max(1));

            *demand.entry(sku.clone()).or_insert(0) += pieces;
            let b = BoxRecord::try_new(CaixaId::new(format!("box-{i}")), wave_class, pieces, sku)
                .expect("gen_range(1..=max_pieces) never yields zero");
            boxes.push(b);
        }

        let mut stock_rows = Vec::new();
        for (sku, total_demand) in demand {
            // Cover every SKU's demand with headroom, split across a handful
            // of positions across floors so area scenarios are nontrivial.
            let budget = total_demand + total_demand / 2 + 1;
            let n_positions = rng.gen_range(1..=4);
            let mut remaining = budget;
            for p in 0..n_positions {
                let floor = rng.gen_range(1..=5);
                let corridor = rng.gen_range(1..=20);
                let qty = if p == n_positions - 1 {
                    remaining
                } else {
                    let share = remaining / (n_positions - p) as u64;
                    remaining -= share;
                    share
                };
                stock_rows.push((sku.clone(), floor, corridor, qty));
            }
        }

        tracing::info!(n_boxes = boxes.len(), n_stock_rows = stock_rows.len(), "generation complete");
        (BoxCatalog { boxes }, stock_rows)
    }

    pub fn small() -> Self {
        Self::new(50, 10, 2, 400, 42)
    }

    pub fn medium() -> Self {
        Self::new(500, 40, 4, 600, 42)
    }

    pub fn large() -> Self {
        Self::new(5000, 200, 8, 800, 42)
    }
}

impl Default for WarehouseGenerator {
    fn default() -> Self {
        Self::medium()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_box_count() {
        let (catalog, _) = WarehouseGenerator::small().generate();
        assert_eq!(catalog.boxes.len(), 50);
    }

    #[test]
    fn stock_covers_total_demand_per_sku() {
        let (catalog, stock_rows) = WarehouseGenerator::new(200, 5, 2, 300, 7).generate();

        let mut demand: ahash::AHashMap<Sku, u64> = ahash::AHashMap::default();
        for b in &catalog.boxes {
            *demand.entry(b.sku.clone()).or_insert(0) += b.pieces;
        }

        let mut available: ahash::AHashMap<Sku, u64> = ahash::AHashMap::default();
        for (sku, _, _, qty) in &stock_rows {
            *available.entry(sku.clone()).or_insert(0) += qty;
        }

        for (sku, needed) in demand {
            assert!(available.get(&sku).copied().unwrap_or(0) >= needed);
        }
    }

    #[test]
    fn deterministic_for_a_fixed_seed() {
        let (a, _) = WarehouseGenerator::new(30, 5, 2, 100, 99).generate();
        let (b, _) = WarehouseGenerator::new(30, 5, 2, 100, 99).generate();
        let ids_a: Vec<_> = a.boxes.iter().map(|x| (x.caixa_id.clone(), x.pieces)).collect();
        let ids_b: Vec<_> = b.boxes.iter().map(|x| (x.caixa_id.clone(), x.pieces)).collect();
        assert_eq!(ids_a, ids_b);
    }
}
