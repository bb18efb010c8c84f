//! Word-vector table held in memory.

use std::collections::HashMap;
use std::path::Path;

use summa_core::errors::EmbeddingError;
use summa_core::traits::IWordEmbeddings;

/// Word vectors keyed by lowercase word.
#[derive(Debug, Clone)]
pub struct InMemoryWordEmbeddings {
    vectors: HashMap<String, Vec<f32>>,
    dimensions: usize,
}

impl InMemoryWordEmbeddings {
    pub fn new(dimensions: usize) -> Self {
        Self {
            vectors: HashMap::new(),
            dimensions,
        }
    }

    /// Add or replace a word's vector.
    pub fn insert(&mut self, word: &str, vector: Vec<f32>) -> Result<(), EmbeddingError> {
        if vector.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }
        self.vectors.insert(word.to_lowercase(), vector);
        Ok(())
    }

    /// Parse word2vec/GloVe text: one `word v1 v2 ...` entry per line, with an
    /// optional leading `count dims` header. Without a header or an explicit
    /// `dimensions`, the first vector fixes the dimensionality.
    pub fn from_text(content: &str, dimensions: Option<usize>) -> Result<Self, EmbeddingError> {
        let mut dims = dimensions;
        let mut vectors = HashMap::new();

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let values: Vec<&str> = fields.collect();

            if index == 0 && values.len() == 1 {
                if let (Ok(_), Ok(header_dims)) = (word.parse::<usize>(), values[0].parse::<usize>()) {
                    match dims {
                        Some(expected) if expected != header_dims => {
                            return Err(EmbeddingError::DimensionMismatch {
                                expected,
                                actual: header_dims,
                            });
                        }
                        _ => dims = Some(header_dims),
                    }
                    continue;
                }
            }

            let vector = values
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|e| EmbeddingError::ParseFailed {
                    line: line_no,
                    reason: e.to_string(),
                })?;
            if vector.is_empty() {
                return Err(EmbeddingError::ParseFailed {
                    line: line_no,
                    reason: format!("'{word}' has no vector components"),
                });
            }
            let expected = *dims.get_or_insert(vector.len());
            if vector.len() != expected {
                return Err(EmbeddingError::DimensionMismatch {
                    expected,
                    actual: vector.len(),
                });
            }
            vectors.insert(word.to_lowercase(), vector);
        }

        let table = Self {
            vectors,
            dimensions: dims.unwrap_or(0),
        };
        tracing::debug!(
            words = table.len(),
            dimensions = table.dimensions,
            "loaded word embeddings"
        );
        Ok(table)
    }

    /// Read a text-format table from disk.
    pub fn from_path(path: impl AsRef<Path>, dimensions: Option<usize>) -> Result<Self, EmbeddingError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EmbeddingError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_text(&content, dimensions)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl IWordEmbeddings for InMemoryWordEmbeddings {
    fn is_known(&self, word: &str) -> bool {
        self.vectors.contains_key(word) || self.vectors.contains_key(&word.to_lowercase())
    }

    fn word_vector(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    fn embedding_size(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_vectors() {
        let text = "2 3\nsolar 1.0 0.0 0.5\npower 0.0 1.0 -0.5\n";
        let table = InMemoryWordEmbeddings::from_text(text, None).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.embedding_size(), 3);
        assert_eq!(table.word_vector("power"), Some(&[0.0, 1.0, -0.5][..]));
    }

    #[test]
    fn headerless_file_takes_dimensions_from_first_vector() {
        let table = InMemoryWordEmbeddings::from_text("wind 0.1 0.2\nfarm 0.3 0.4", None).unwrap();
        assert_eq!(table.embedding_size(), 2);
    }

    #[test]
    fn ragged_vectors_are_rejected() {
        let result = InMemoryWordEmbeddings::from_text("wind 0.1 0.2\nfarm 0.3", None);
        assert!(matches!(
            result,
            Err(EmbeddingError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn unparsable_component_reports_line() {
        let result = InMemoryWordEmbeddings::from_text("wind 0.1 0.2\nfarm 0.3 abc", None);
        assert!(matches!(result, Err(EmbeddingError::ParseFailed { line: 2, .. })));
    }

    #[test]
    fn lookup_is_case_insensitive_for_known_check() {
        let mut table = InMemoryWordEmbeddings::new(2);
        table.insert("Solar", vec![1.0, 1.0]).unwrap();
        assert!(table.is_known("SOLAR"));
        assert!(table.word_vector("solar").is_some());
    }
}
