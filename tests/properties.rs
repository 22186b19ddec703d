//! Property tests over a full generate -> run pipeline, checking the
//! cross-module invariants that no single unit test can see in isolation.

use proptest::prelude::*;

use wavebatch::scheduler::BatchingConfig;
use wavebatch::{orchestrator, WarehouseGenerator, WAVE_CAPACITY};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn no_wave_exceeds_capacity_or_mixes_classes(
        n_boxes in 5usize..60,
        n_skus in 1usize..6,
        n_classes in 1usize..4,
        max_pieces in 100u64..2500,
        seed in any::<u64>(),
    ) {
        let generator = WarehouseGenerator::new(n_boxes, n_skus, n_classes, max_pieces, seed);
        let (catalog, stock_rows) = generator.generate();
        let config = BatchingConfig { rng_seed: Some(seed), ..Default::default() };

        let outcome = orchestrator::run(catalog.boxes, stock_rows, &config).unwrap();

        for wave in &outcome.waves {
            prop_assert!(wave.total_pieces <= WAVE_CAPACITY);
            let expected: u64 = wave.boxes.iter().map(|b| b.pieces).sum();
            prop_assert_eq!(expected, wave.total_pieces);
            for b in &wave.boxes {
                prop_assert_eq!(&b.wave_class, &wave.wave_class);
            }
        }
        prop_assert!(outcome.errors.is_empty());
    }

    #[test]
    fn allocated_pieces_never_exceed_original_stock(
        n_boxes in 5usize..60,
        n_skus in 1usize..6,
        n_classes in 1usize..4,
        max_pieces in 100u64..2500,
        seed in any::<u64>(),
    ) {
        let generator = WarehouseGenerator::new(n_boxes, n_skus, n_classes, max_pieces, seed);
        let (catalog, stock_rows) = generator.generate();

        let mut original_total: ahash::AHashMap<String, u64> = ahash::AHashMap::default();
        for (sku, _, _, qty) in &stock_rows {
            *original_total.entry(sku.0.clone()).or_insert(0) += qty;
        }

        let config = BatchingConfig { rng_seed: Some(seed), ..Default::default() };
        let outcome = orchestrator::run(catalog.boxes, stock_rows, &config).unwrap();

        let mut used: ahash::AHashMap<String, u64> = ahash::AHashMap::default();
        for wave in &outcome.waves {
            for b in &wave.boxes {
                *used.entry(b.sku.0.clone()).or_insert(0) += b.pieces;
            }
        }

        for (sku, used_qty) in used {
            let available = original_total.get(&sku).copied().unwrap_or(0);
            prop_assert!(used_qty <= available);
        }
    }
}
