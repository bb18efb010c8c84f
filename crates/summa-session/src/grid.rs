//! Parameter grids for sweeping store configurations.
//!
//! Every store section lists candidate values per parameter. Expansion takes
//! the Cartesian product, writes each combination over a base
//! [`FeedbackConfig`] and shuffles the result with a seeded generator so a
//! partially run sweep still samples the space evenly.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use summa_core::config::{FeedbackConfig, StoreKind};
use summa_core::errors::{SummaError, SummaResult};

const MASSES: [f64; 5] = [4.0, 1.0, 0.0, -1.0, -4.0];
const CUT_OFFS: [f64; 5] = [0.998, 0.98, 0.9, 0.6, 0.4];
const NGRAM_FACTORS: [f64; 8] = [1.0, 0.0, 0.05, 0.25, 0.5, 2.0, 4.0, 8.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianGrid {
    pub mass_accept: Vec<f64>,
    pub mass_reject: Vec<f64>,
    pub iterations_accept: Vec<usize>,
    pub iterations_reject: Vec<usize>,
    pub cut_off_threshold: Vec<f64>,
}

impl Default for GaussianGrid {
    fn default() -> Self {
        Self {
            mass_accept: MASSES.to_vec(),
            mass_reject: MASSES.to_vec(),
            iterations_accept: vec![16, 128, 1024],
            iterations_reject: vec![2, 4, 8, 16, 64],
            cut_off_threshold: CUT_OFFS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomWalkGrid {
    pub mass_accept: Vec<f64>,
    pub mass_reject: Vec<f64>,
    pub iterations_accept: Vec<usize>,
    pub iterations_reject: Vec<usize>,
    pub cut_off_threshold: Vec<f64>,
    pub propagation_abort_threshold: Vec<f64>,
}

impl Default for RandomWalkGrid {
    fn default() -> Self {
        Self {
            mass_accept: MASSES.to_vec(),
            mass_reject: MASSES.to_vec(),
            iterations_accept: vec![128, 1024, 10000],
            iterations_reject: vec![64, 200, 5000],
            cut_off_threshold: CUT_OFFS.to_vec(),
            propagation_abort_threshold: vec![0.01, 0.1, 0.25, 0.5, 0.75, 0.9],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NgramGrid {
    pub n: Vec<usize>,
    pub factor_accept: Vec<f64>,
    pub factor_reject: Vec<f64>,
}

impl Default for NgramGrid {
    fn default() -> Self {
        Self {
            n: vec![2, 3, 4, 5],
            factor_accept: NGRAM_FACTORS.to_vec(),
            factor_reject: NGRAM_FACTORS.to_vec(),
        }
    }
}

/// Candidate values per store. Stores without a section run once with the
/// base configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterGrid {
    pub gaussian: GaussianGrid,
    pub random_walk: RandomWalkGrid,
    pub ngram: NgramGrid,
    /// Seed of the shuffle.
    pub seed: u64,
}

impl Default for ParameterGrid {
    fn default() -> Self {
        Self {
            gaussian: GaussianGrid::default(),
            random_walk: RandomWalkGrid::default(),
            ngram: NgramGrid::default(),
            seed: summa_core::config::defaults::DEFAULT_RANDOM_SEED,
        }
    }
}

impl ParameterGrid {
    /// Number of configurations `expand` yields for `store`.
    pub fn combinations(&self, store: StoreKind) -> usize {
        match store {
            StoreKind::WordEmbeddingGaussian => {
                let g = &self.gaussian;
                g.mass_reject.len()
                    * g.mass_accept.len()
                    * g.iterations_accept.len()
                    * g.iterations_reject.len()
                    * g.cut_off_threshold.len()
            }
            StoreKind::WordEmbeddingRandomWalk => {
                let g = &self.random_walk;
                g.mass_reject.len()
                    * g.mass_accept.len()
                    * g.iterations_accept.len()
                    * g.iterations_reject.len()
                    * g.cut_off_threshold.len()
                    * g.propagation_abort_threshold.len()
            }
            StoreKind::SimpleNgram => {
                let g = &self.ngram;
                g.n.len() * g.factor_reject.len() * g.factor_accept.len()
            }
            StoreKind::Baseline | StoreKind::PageRank | StoreKind::WordEmbeddingEgoPr => 1,
        }
    }

    /// Every combination for `store` written over `base`, in shuffled order.
    /// Combinations that fail validation are an error.
    pub fn expand(&self, store: StoreKind, base: &FeedbackConfig) -> SummaResult<Vec<FeedbackConfig>> {
        let mut base = base.clone();
        base.store = store;
        let mut configs = Vec::with_capacity(self.combinations(store));

        match store {
            StoreKind::WordEmbeddingGaussian => {
                let g = &self.gaussian;
                for &mr in &g.mass_reject {
                    for &ma in &g.mass_accept {
                        for &ia in &g.iterations_accept {
                            for &ir in &g.iterations_reject {
                                for &co in &g.cut_off_threshold {
                                    let mut config = base.clone();
                                    config.gaussian.mass_reject = mr;
                                    config.gaussian.mass_accept = ma;
                                    config.gaussian.iterations_accept = ia;
                                    config.gaussian.iterations_reject = ir;
                                    config.gaussian.cut_off_threshold = co;
                                    configs.push(config);
                                }
                            }
                        }
                    }
                }
            }
            StoreKind::WordEmbeddingRandomWalk => {
                let g = &self.random_walk;
                for &mr in &g.mass_reject {
                    for &ma in &g.mass_accept {
                        for &ia in &g.iterations_accept {
                            for &ir in &g.iterations_reject {
                                for &co in &g.cut_off_threshold {
                                    for &pat in &g.propagation_abort_threshold {
                                        let mut config = base.clone();
                                        config.random_walk.mass_reject = mr;
                                        config.random_walk.mass_accept = ma;
                                        config.random_walk.iterations_accept = ia;
                                        config.random_walk.iterations_reject = ir;
                                        config.random_walk.cut_off_threshold = co;
                                        config.random_walk.propagation_abort_threshold = pat;
                                        configs.push(config);
                                    }
                                }
                            }
                        }
                    }
                }
            }
            StoreKind::SimpleNgram => {
                let g = &self.ngram;
                for &n in &g.n {
                    for &fr in &g.factor_reject {
                        for &fa in &g.factor_accept {
                            let mut config = base.clone();
                            config.ngram.n = n;
                            config.ngram.factor_reject = fr;
                            config.ngram.factor_accept = fa;
                            configs.push(config);
                        }
                    }
                }
            }
            StoreKind::Baseline | StoreKind::PageRank | StoreKind::WordEmbeddingEgoPr => {
                configs.push(base);
            }
        }

        for config in &configs {
            config.validate().map_err(|e| SummaError::Config {
                reason: format!("grid combination for {store} is invalid: {e}"),
            })?;
        }

        let mut rng = ChaCha20Rng::seed_from_u64(self.seed);
        configs.shuffle(&mut rng);
        tracing::debug!(store = %store, combinations = configs.len(), "parameter grid expanded");
        Ok(configs)
    }

    /// Expand every store in `stores`, visiting the stores in shuffled order.
    pub fn expand_all(
        &self,
        stores: &[StoreKind],
        base: &FeedbackConfig,
    ) -> SummaResult<Vec<FeedbackConfig>> {
        let mut order = stores.to_vec();
        let mut rng = ChaCha20Rng::seed_from_u64(self.seed);
        order.shuffle(&mut rng);

        let mut all = Vec::new();
        for store in order {
            all.extend(self.expand(store, base)?);
        }
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_sizes() {
        let grid = ParameterGrid::default();
        assert_eq!(grid.combinations(StoreKind::WordEmbeddingGaussian), 1875);
        assert_eq!(grid.combinations(StoreKind::WordEmbeddingRandomWalk), 6750);
        assert_eq!(grid.combinations(StoreKind::SimpleNgram), 256);
        assert_eq!(grid.combinations(StoreKind::Baseline), 1);
    }

    #[test]
    fn stores_without_a_section_run_once() {
        let grid = ParameterGrid::default();
        let configs = grid.expand(StoreKind::PageRank, &FeedbackConfig::default()).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].store, StoreKind::PageRank);
    }

    #[test]
    fn expand_all_is_reproducible() {
        let grid = ParameterGrid::default();
        let stores = [StoreKind::SimpleNgram, StoreKind::Baseline, StoreKind::PageRank];
        let first = grid.expand_all(&stores, &FeedbackConfig::default()).unwrap();
        let second = grid.expand_all(&stores, &FeedbackConfig::default()).unwrap();
        assert_eq!(first.len(), 258);
        let tags = |configs: &[FeedbackConfig]| -> Vec<(StoreKind, usize, u64)> {
            configs
                .iter()
                .map(|c| (c.store, c.ngram.n, c.ngram.factor_accept.to_bits()))
                .collect()
        };
        assert_eq!(tags(&first), tags(&second));
    }

    #[test]
    fn invalid_combination_is_reported() {
        let grid = ParameterGrid {
            ngram: NgramGrid {
                n: vec![1],
                ..NgramGrid::default()
            },
            ..ParameterGrid::default()
        };
        let result = grid.expand(StoreKind::SimpleNgram, &FeedbackConfig::default());
        assert!(matches!(result, Err(SummaError::Config { .. })));
    }
}
