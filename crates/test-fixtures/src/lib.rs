//! Test fixtures for the summa workspace: toy corpora, a toy embedding table,
//! and a greedy budgeted optimizer standing in for the ILP solver.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use summa_core::errors::SummaResult;
use summa_core::traits::ISummaryOptimizer;
use summa_core::Sentence;
use summa_embeddings::{ConceptEmbedder, InMemoryWordEmbeddings};

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

#[derive(Debug, Deserialize)]
struct CorpusFile {
    name: String,
    sentences: Vec<String>,
    reference: Vec<String>,
    #[serde(default)]
    stopwords: Vec<String>,
}

/// A small corpus ready for a feedback session.
#[derive(Debug, Clone)]
pub struct ToyCorpus {
    pub name: String,
    /// Sentences with bigram concepts.
    pub sentences: Vec<Sentence>,
    /// Sentence frequency of every concept.
    pub weights: HashMap<String, f64>,
    /// Concepts of the reference summary.
    pub reference: Vec<String>,
    pub stopwords: Vec<String>,
}

impl ToyCorpus {
    /// Largest concept frequency.
    pub fn max_weight(&self) -> f64 {
        self.weights.values().copied().fold(0.0, f64::max)
    }

    /// Every distinct concept, sorted.
    pub fn concepts(&self) -> Vec<String> {
        let all: BTreeSet<&String> = self.sentences.iter().flat_map(|s| s.concepts.iter()).collect();
        all.into_iter().cloned().collect()
    }
}

/// Load `data/corpus/<name>.json`.
pub fn load_corpus(name: &str) -> ToyCorpus {
    let file: CorpusFile = load_fixture(&format!("corpus/{name}.json"));
    let sentences: Vec<Sentence> = file.sentences.iter().map(|t| Sentence::from_text(t)).collect();

    let mut weights = HashMap::new();
    for sentence in &sentences {
        let unique: HashSet<&String> = sentence.concepts.iter().collect();
        for concept in unique {
            *weights.entry(concept.clone()).or_insert(0.0) += 1.0;
        }
    }

    ToyCorpus {
        name: file.name,
        sentences,
        weights,
        reference: file.reference,
        stopwords: file.stopwords,
    }
}

/// The 4-dimensional toy word table covering the energy corpus, except for
/// "subsidises" and "quickly".
pub fn toy_embeddings() -> InMemoryWordEmbeddings {
    InMemoryWordEmbeddings::from_path(fixture_path("embeddings/toy.txt"), None)
        .unwrap_or_else(|e| panic!("Failed to load toy embeddings: {e}"))
}

pub fn toy_embedder() -> Arc<ConceptEmbedder> {
    Arc::new(ConceptEmbedder::new(Arc::new(toy_embeddings())))
}

/// Picks sentences by the summed weight of their not-yet-covered concepts
/// until nothing with positive gain fits the budget. Ties go to the earlier
/// sentence.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyOptimizer;

impl ISummaryOptimizer for GreedyOptimizer {
    fn solve(
        &self,
        weights: &HashMap<String, f64>,
        budget: usize,
        sentences: &[Sentence],
    ) -> SummaResult<Vec<usize>> {
        let mut covered: HashSet<&str> = HashSet::new();
        let mut selected: Vec<usize> = Vec::new();
        let mut used = 0;

        loop {
            let mut best: Option<(usize, f64)> = None;
            for (i, sentence) in sentences.iter().enumerate() {
                if selected.contains(&i) || used + sentence.length > budget {
                    continue;
                }
                let unique: HashSet<&str> = sentence
                    .concepts
                    .iter()
                    .map(String::as_str)
                    .filter(|c| !covered.contains(c))
                    .collect();
                let gain: f64 = unique.iter().map(|c| weights.get(*c).copied().unwrap_or(0.0)).sum();
                if gain > 0.0 && best.map_or(true, |(_, g)| gain > g) {
                    best = Some((i, gain));
                }
            }
            let Some((i, _)) = best else {
                break;
            };
            selected.push(i);
            used += sentences[i].length;
            covered.extend(sentences[i].concepts.iter().map(String::as_str));
        }

        selected.sort_unstable();
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use summa_core::traits::IWordEmbeddings;

    #[test]
    fn corpus_files_exist() {
        for f in ["corpus/energy.json", "corpus/tiny.json", "embeddings/toy.txt"] {
            assert!(fixture_exists(f), "Missing fixture: {f}");
        }
    }

    #[test]
    fn energy_corpus_weights_are_sentence_frequencies() {
        let corpus = load_corpus("energy");
        assert_eq!(corpus.sentences.len(), 8);
        assert_eq!(corpus.weights["solar power"], 2.0);
        assert_eq!(corpus.weights["coal plants"], 1.0);
        assert_eq!(corpus.max_weight(), 2.0);
    }

    #[test]
    fn toy_table_leaves_two_words_unknown() {
        let table = toy_embeddings();
        assert_eq!(table.len(), 32);
        assert_eq!(table.embedding_size(), 4);
        assert!(!table.is_known("subsidises"));
        assert!(!table.is_known("quickly"));
    }

    #[test]
    fn greedy_respects_budget() {
        let corpus = load_corpus("energy");
        let weights: HashMap<String, f64> = corpus.weights.clone();
        let picked = GreedyOptimizer.solve(&weights, 12, &corpus.sentences).unwrap();
        let used: usize = picked.iter().map(|&i| corpus.sentences[i].length).sum();
        assert!(used <= 12);
        assert!(!picked.is_empty());
    }

    #[test]
    fn greedy_skips_zero_gain_sentences() {
        let sentences = vec![Sentence::from_text("a b"), Sentence::from_text("c d")];
        let weights = HashMap::from([("a b".to_string(), 1.0)]);
        assert_eq!(GreedyOptimizer.solve(&weights, 100, &sentences).unwrap(), vec![0]);
    }
}
