//! Property tests for parameter grid expansion.

use proptest::prelude::*;

use summa_core::config::{FeedbackConfig, StoreKind};
use summa_session::grid::{NgramGrid, ParameterGrid};

fn ngram_grid(seed: u64, sizes: Vec<usize>, factors: Vec<u8>) -> ParameterGrid {
    let factors: Vec<f64> = factors.into_iter().map(|f| f64::from(f) / 4.0).collect();
    ParameterGrid {
        ngram: NgramGrid {
            n: sizes,
            factor_accept: factors.clone(),
            factor_reject: factors,
        },
        seed,
        ..ParameterGrid::default()
    }
}

fn keys(configs: &[FeedbackConfig]) -> Vec<(usize, u64, u64)> {
    let mut keys: Vec<(usize, u64, u64)> = configs
        .iter()
        .map(|c| (c.ngram.n, c.ngram.factor_accept.to_bits(), c.ngram.factor_reject.to_bits()))
        .collect();
    keys.sort_unstable();
    keys
}

proptest! {
    #[test]
    fn expansion_is_a_seeded_permutation_of_the_product(
        seed_a in any::<u64>(),
        seed_b in any::<u64>(),
        sizes in prop::collection::vec(2usize..6, 1..4),
        factors in prop::collection::vec(0u8..16, 1..4),
    ) {
        let base = FeedbackConfig::default();
        let grid_a = ngram_grid(seed_a, sizes.clone(), factors.clone());
        let grid_b = ngram_grid(seed_b, sizes.clone(), factors.clone());

        let a = grid_a.expand(StoreKind::SimpleNgram, &base).unwrap();
        let b = grid_b.expand(StoreKind::SimpleNgram, &base).unwrap();
        let again = grid_a.expand(StoreKind::SimpleNgram, &base).unwrap();

        prop_assert_eq!(a.len(), sizes.len() * factors.len() * factors.len());
        prop_assert_eq!(a.len(), grid_a.combinations(StoreKind::SimpleNgram));
        prop_assert!(a.iter().all(|c| c.store == StoreKind::SimpleNgram));
        prop_assert_eq!(keys(&a), keys(&b));

        let order = |configs: &[FeedbackConfig]| -> Vec<(usize, u64, u64)> {
            configs
                .iter()
                .map(|c| (c.ngram.n, c.ngram.factor_accept.to_bits(), c.ngram.factor_reject.to_bits()))
                .collect()
        };
        prop_assert_eq!(order(&a), order(&again));
    }
}
