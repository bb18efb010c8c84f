use serde::{Deserialize, Serialize};

use crate::constants::NGRAM_SEPARATOR;

/// A corpus sentence as the feedback stores see it.
///
/// `untokenized_concepts[i]` is the surface form of `concepts[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// Concept keys (stemmed n-grams or phrases) in order of occurrence.
    pub concepts: Vec<String>,
    /// Surface forms aligned with `concepts`.
    #[serde(default)]
    pub untokenized_concepts: Vec<String>,
    /// Token stream, used by the token-level n-gram store.
    #[serde(default)]
    pub tokens: Vec<String>,
    /// The sentence text as shown in a summary.
    #[serde(default)]
    pub untokenized_form: String,
    /// Cost of the sentence against the optimizer budget (words).
    #[serde(default)]
    pub length: usize,
}

impl Sentence {
    /// Build a sentence from concepts and their surface forms.
    pub fn new(concepts: Vec<String>, untokenized_concepts: Vec<String>) -> Self {
        Self {
            concepts,
            untokenized_concepts,
            ..Self::default()
        }
    }

    /// Build a sentence from raw text: tokens are the whitespace-split words and
    /// concepts are the token bigrams.
    pub fn from_text(text: &str) -> Self {
        let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let concepts: Vec<String> = tokens
            .windows(2)
            .map(|w| w.join(NGRAM_SEPARATOR))
            .collect();
        Self {
            untokenized_concepts: concepts.clone(),
            concepts,
            length: tokens.len(),
            untokenized_form: text.to_string(),
            tokens,
        }
    }

    /// Attach a token stream.
    pub fn with_tokens(mut self, tokens: Vec<String>) -> Self {
        self.length = tokens.len();
        self.tokens = tokens;
        self
    }

    /// Surface words of the concept at `index`, falling back to the concept key
    /// itself when no surface form is aligned with it.
    pub fn surface_words(&self, index: usize) -> Vec<String> {
        let surface = self
            .untokenized_concepts
            .get(index)
            .or_else(|| self.concepts.get(index));
        match surface {
            Some(s) => s.split(NGRAM_SEPARATOR).map(str::to_string).collect(),
            None => Vec::new(),
        }
    }
}
