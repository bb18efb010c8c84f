//! ConceptEmbedder behaviour: summing, unknown-word accounting, caching.

use std::sync::Arc;

use summa_embeddings::{cosine_similarity, ConceptEmbedder, InMemoryWordEmbeddings};

fn make_table() -> InMemoryWordEmbeddings {
    let mut table = InMemoryWordEmbeddings::new(3);
    table.insert("solar", vec![1.0, 0.0, 0.0]).unwrap();
    table.insert("power", vec![0.0, 1.0, 0.0]).unwrap();
    table.insert("wind", vec![0.5, 0.0, 0.5]).unwrap();
    table
}

fn make_embedder() -> ConceptEmbedder {
    ConceptEmbedder::new(Arc::new(make_table()))
}

#[test]
fn concept_vector_is_sum_of_word_vectors() {
    let embedder = make_embedder();
    let v = embedder.embed(&["solar", "power"]).unwrap();
    assert_eq!(v, vec![1.0, 1.0, 0.0]);
    assert_eq!(embedder.error_count(), 0);
}

#[test]
fn unknown_words_are_counted_and_skipped() {
    let embedder = make_embedder();
    let v = embedder.embed(&["solar", "xylophone"]).unwrap();
    assert_eq!(v, vec![1.0, 0.0, 0.0]);
    assert_eq!(embedder.error_count(), 1);
}

#[test]
fn concept_without_known_words_is_zero_vector() {
    let embedder = make_embedder();
    let v = embedder.embed(&["qux", "quux"]).unwrap();
    assert_eq!(v, vec![0.0; 3]);
    assert_eq!(embedder.error_count(), 2);
}

#[test]
fn uppercase_surface_words_resolve_to_lowercase_entries() {
    let embedder = make_embedder();
    let v = embedder.embed(&["Solar", "POWER"]).unwrap();
    assert_eq!(v, vec![1.0, 1.0, 0.0]);
}

#[test]
fn cache_hit_does_not_recount_unknown_words() {
    let embedder = make_embedder();
    let words = ["wind", "turbine"];

    let first = embedder.embed(&words).unwrap();
    assert_eq!(embedder.error_count(), 1);

    let second = embedder.embed(&words).unwrap();
    assert_eq!(second, first);
    assert_eq!(embedder.error_count(), 1);
    assert_eq!(embedder.cache_len(), 1);
}

#[test]
fn similar_concepts_have_high_cosine() {
    let embedder = make_embedder();
    let a = embedder.embed(&["solar", "power"]).unwrap();
    let b = embedder.embed(&["solar"]).unwrap();
    let sim = cosine_similarity(&a, &b);
    assert!((sim - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-6);
}
