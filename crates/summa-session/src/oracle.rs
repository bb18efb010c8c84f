//! Label sources: a reference-summary oracle for simulated sessions and a
//! human oracle replaying explicit labels.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use summa_core::constants::NGRAM_SEPARATOR;
use summa_core::errors::SummaResult;
use summa_core::traits::IOracle;
use summa_core::{FlightRecorder, Record};

/// Simulates a user by peeking at the concepts of a reference summary.
///
/// A sample is accepted when the reference contains it and rejected
/// otherwise. Concepts already carrying the same label in the recorder's
/// union are not labelled again, and concepts made only of stopwords are
/// never labelled.
#[derive(Debug, Clone, Default)]
pub struct ReferenceOracle {
    reference: HashSet<String>,
    stopwords: HashSet<String>,
}

impl ReferenceOracle {
    pub fn new<R, S>(reference: R) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reference: reference.into_iter().map(Into::into).collect(),
            stopwords: HashSet::new(),
        }
    }

    pub fn with_stopwords<W, S>(mut self, stopwords: W) -> Self
    where
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = stopwords.into_iter().map(Into::into).collect();
        self
    }

    fn is_stopword_only(&self, concept: &str) -> bool {
        !self.stopwords.is_empty()
            && concept
                .split(NGRAM_SEPARATOR)
                .filter(|t| !t.is_empty())
                .all(|t| self.stopwords.contains(t))
    }
}

impl IOracle for ReferenceOracle {
    fn get_labels(&self, samples: &[String], recorder: &FlightRecorder) -> SummaResult<Record> {
        let union = recorder.union();
        let mut accept = BTreeSet::new();
        let mut reject = BTreeSet::new();

        for sample in samples {
            if self.is_stopword_only(sample) {
                continue;
            }
            if self.reference.contains(sample) {
                if !union.accept().contains(sample) {
                    accept.insert(sample.as_str());
                }
            } else if !union.reject().contains(sample) {
                reject.insert(sample.as_str());
            }
        }

        tracing::debug!(
            samples = samples.len(),
            accepts = accept.len(),
            rejects = reject.len(),
            "reference oracle labelled samples"
        );
        Ok(Record::try_new(accept, reject, Vec::<&str>::new())?)
    }
}

/// A label given by a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelValue {
    Accept,
    Reject,
}

/// One `{concept, value}` entry of a human labelling round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub concept: String,
    pub value: LabelValue,
}

/// Replays labels collected from a person. Only the samples it is asked
/// about are labelled.
#[derive(Debug, Clone, Default)]
pub struct HumanOracle {
    accepts: HashSet<String>,
    rejects: HashSet<String>,
}

impl HumanOracle {
    /// Build from explicit labels. A concept labelled both ways keeps its
    /// last label.
    pub fn new(labels: impl IntoIterator<Item = Label>) -> Self {
        let mut oracle = Self::default();
        for label in labels {
            match label.value {
                LabelValue::Accept => {
                    oracle.rejects.remove(&label.concept);
                    oracle.accepts.insert(label.concept);
                }
                LabelValue::Reject => {
                    oracle.accepts.remove(&label.concept);
                    oracle.rejects.insert(label.concept);
                }
            }
        }
        oracle
    }

    /// Parse a JSON array of `{"concept": .., "value": "accept" | "reject"}`.
    pub fn from_json(json: &str) -> SummaResult<Self> {
        let labels: Vec<Label> = serde_json::from_str(json)?;
        Ok(Self::new(labels))
    }
}

impl IOracle for HumanOracle {
    fn get_labels(&self, samples: &[String], _recorder: &FlightRecorder) -> SummaResult<Record> {
        let accept = samples.iter().filter(|s| self.accepts.contains(*s));
        let reject = samples.iter().filter(|s| self.rejects.contains(*s));
        Ok(Record::try_new(accept.cloned(), reject.cloned(), Vec::<String>::new())?)
    }
}
