//! Property tests for ConceptEmbedder accounting.

use std::sync::Arc;

use proptest::prelude::*;

use summa_embeddings::{ConceptEmbedder, InMemoryWordEmbeddings};

const KNOWN: [&str; 4] = ["sun", "wind", "coal", "grid"];
const UNKNOWN: [&str; 3] = ["xylo", "quux", "zorp"];

fn embedder() -> ConceptEmbedder {
    let mut table = InMemoryWordEmbeddings::new(2);
    for (i, word) in KNOWN.iter().enumerate() {
        table.insert(*word, vec![i as f32, 1.0]).unwrap();
    }
    ConceptEmbedder::new(Arc::new(table))
}

proptest! {
    #[test]
    fn unknown_words_counted_once_per_distinct_concept(
        concepts in prop::collection::vec(prop::collection::vec(0usize..7, 1..4), 1..12),
    ) {
        let embedder = embedder();
        let words: Vec<Vec<&str>> = concepts
            .iter()
            .map(|c| c.iter().map(|&i| if i < 4 { KNOWN[i] } else { UNKNOWN[i - 4] }).collect())
            .collect();

        let mut seen = std::collections::HashSet::new();
        let mut expected_errors = 0u64;
        for concept in &words {
            let v = embedder.embed(concept).unwrap();
            let known = concept.iter().filter(|w| KNOWN.contains(*w)).count();
            // Second component is 1.0 for every known word.
            prop_assert_eq!(v[1], known as f32);
            if seen.insert(concept.join(" ")) {
                expected_errors += (concept.len() - known) as u64;
            }
        }
        prop_assert_eq!(embedder.error_count(), expected_errors);
        prop_assert_eq!(embedder.cache_len(), seen.len() as u64);
    }
}
