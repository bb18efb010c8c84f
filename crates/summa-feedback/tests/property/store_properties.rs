//! Property tests for the feedback stores.

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use proptest::sample::Index;

use summa_core::config::{
    BaselineConfig, FeedbackConfig, OracleType, PageRankConfig, RandomWalkConfig, StoreKind,
};
use summa_core::traits::IFeedbackStore;
use summa_core::{FlightRecorder, Sentence};
use summa_feedback::{
    build_store, BaselineFeedbackStore, PageRankFeedbackGraph,
    WordEmbeddingRandomWalkDiffusionFeedbackGraph,
};

const VOCAB: [&str; 12] = [
    "solar", "power", "wind", "energy", "coal", "carbon", "clean", "electricity", "panels",
    "turbines", "offshore", "emissions",
];

fn sentences_strategy() -> impl Strategy<Value = Vec<Sentence>> {
    prop::collection::vec(
        prop::collection::vec(prop::sample::select(VOCAB.to_vec()), 2..7)
            .prop_map(|words| Sentence::from_text(&words.join(" "))),
        1..6,
    )
}

fn distinct_concepts(sentences: &[Sentence]) -> Vec<String> {
    let all: BTreeSet<&String> = sentences.iter().flat_map(|s| s.concepts.iter()).collect();
    all.into_iter().cloned().collect()
}

/// One round per entry: indices into the concept list, accepted then rejected.
fn record_rounds(
    concepts: &[String],
    rounds: &[(Vec<Index>, Vec<Index>)],
) -> FlightRecorder {
    let mut recorder = FlightRecorder::new();
    for (accept_idx, reject_idx) in rounds {
        let accept: BTreeSet<String> = accept_idx
            .iter()
            .map(|i| concepts[i.index(concepts.len())].clone())
            .collect();
        let reject: BTreeSet<String> = reject_idx
            .iter()
            .map(|i| concepts[i.index(concepts.len())].clone())
            .filter(|c| !accept.contains(c))
            .collect();
        recorder.record(accept, reject, Vec::<String>::new()).unwrap();
    }
    recorder
}

fn rounds_strategy() -> impl Strategy<Value = Vec<(Vec<Index>, Vec<Index>)>> {
    prop::collection::vec(
        (
            prop::collection::vec(any::<Index>(), 0..3),
            prop::collection::vec(any::<Index>(), 0..3),
        ),
        1..4,
    )
}

fn corpus_weights(sentences: &[Sentence]) -> HashMap<String, f64> {
    let mut weights = HashMap::new();
    for concept in sentences.iter().flat_map(|s| s.concepts.iter()) {
        *weights.entry(concept.clone()).or_insert(0.0) += 1.0;
    }
    weights
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_store_keeps_weights_in_bounds(
        sentences in sentences_strategy(),
        rounds in rounds_strategy(),
    ) {
        let concepts = distinct_concepts(&sentences);
        let weights = corpus_weights(&sentences);
        for kind in StoreKind::ALL {
            let mut store = build_store(
                &FeedbackConfig::for_store(kind),
                Some(test_fixtures::toy_embedder()),
            ).unwrap();
            store.add_sentences(&sentences, Some(&weights), None).unwrap();

            let mut recorder = FlightRecorder::new();
            for round in &rounds {
                let step = record_rounds(&concepts, std::slice::from_ref(round));
                recorder.add_record(step.latest());
                store.incorporate_feedback(&recorder).unwrap();
                let result = store.get_weights();
                if kind == StoreKind::PageRank && result.is_err() {
                    // every concept may have been rejected and deleted
                    continue;
                }
                let snapshot = result.unwrap();
                for (_, w) in snapshot.iter() {
                    prop_assert!((0.0..=1.0).contains(&w), "{kind}: {w}");
                }
            }
        }
    }

    #[test]
    fn random_walks_account_for_all_mass(
        sentences in sentences_strategy(),
        rounds in rounds_strategy(),
        mass_accept in 0.1f64..4.0,
        mass_reject in -4.0f64..-0.1,
        walks in 1usize..6,
        seed in any::<u64>(),
    ) {
        let concepts = distinct_concepts(&sentences);
        let config = RandomWalkConfig {
            mass_accept,
            mass_reject,
            iterations_accept: walks,
            iterations_reject: walks,
            seed,
            ..RandomWalkConfig::default()
        };
        let mut store =
            WordEmbeddingRandomWalkDiffusionFeedbackGraph::new(test_fixtures::toy_embedder(), config);
        store.add_sentences(&sentences, Some(&corpus_weights(&sentences)), None).unwrap();

        let recorder = record_rounds(&concepts, &rounds);
        store.incorporate_feedback(&recorder).unwrap();
        for trace in store.traces() {
            prop_assert!((trace.accounted() - trace.budget).abs() < 1e-9);
        }
    }

    #[test]
    fn baseline_feedback_is_idempotent(
        sentences in sentences_strategy(),
        rounds in rounds_strategy(),
        preset in prop::sample::select(vec![
            OracleType::AcceptAll,
            OracleType::RejectAll,
            OracleType::AcceptReject,
            OracleType::KeepTrack,
            OracleType::TopN,
        ]),
    ) {
        let concepts = distinct_concepts(&sentences);
        let mut store = BaselineFeedbackStore::new(BaselineConfig {
            oracle_type: preset,
            top_n: 3,
            ..BaselineConfig::default()
        });
        store.add_sentences(&sentences, Some(&corpus_weights(&sentences)), None).unwrap();

        let recorder = record_rounds(&concepts, &rounds);
        store.incorporate_feedback(&recorder).unwrap();
        let once = store.get_weights().unwrap();
        store.incorporate_feedback(&recorder).unwrap();
        prop_assert_eq!(once, store.get_weights().unwrap());
    }

    #[test]
    fn pagerank_deletions_are_final(
        sentences in sentences_strategy(),
        more in sentences_strategy(),
        rejected in prop::collection::vec(any::<Index>(), 1..4),
    ) {
        let concepts = distinct_concepts(&sentences);
        let mut store = PageRankFeedbackGraph::new(PageRankConfig::default());
        store.add_sentences(&sentences, None, None).unwrap();

        let reject: BTreeSet<String> = rejected
            .iter()
            .map(|i| concepts[i.index(concepts.len())].clone())
            .collect();
        let mut recorder = FlightRecorder::new();
        recorder.record(Vec::<String>::new(), reject.clone(), Vec::<String>::new()).unwrap();
        store.incorporate_feedback(&recorder).unwrap();
        store.add_sentences(&more, None, None).unwrap();
        store.add_sentences(&sentences, None, None).unwrap();

        for concept in &reject {
            prop_assert!(!store.contains(concept));
        }
        if let Ok(weights) = store.get_weights() {
            for concept in &reject {
                prop_assert!(!weights.contains(concept));
            }
        }
    }
}
