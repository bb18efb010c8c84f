use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::FeedbackError;

/// Concepts labelled in one feedback round.
///
/// Within a record the three sets are disjoint. A record never changes after
/// construction; only the flight recorder's running union grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    accept: BTreeSet<String>,
    reject: BTreeSet<String>,
    implicit_reject: BTreeSet<String>,
}

impl Record {
    /// Build a record, failing if a concept appears in more than one set.
    pub fn try_new<A, R, I, S>(accept: A, reject: R, implicit_reject: I) -> Result<Self, FeedbackError>
    where
        A: IntoIterator<Item = S>,
        R: IntoIterator<Item = S>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let accept: BTreeSet<String> = accept.into_iter().map(Into::into).collect();
        let reject: BTreeSet<String> = reject.into_iter().map(Into::into).collect();
        let implicit_reject: BTreeSet<String> = implicit_reject.into_iter().map(Into::into).collect();

        let overlap = accept
            .intersection(&reject)
            .chain(accept.intersection(&implicit_reject))
            .chain(reject.intersection(&implicit_reject))
            .next();
        if let Some(concept) = overlap {
            return Err(FeedbackError::InvalidRecord {
                reason: format!("'{concept}' is labelled twice in one round"),
            });
        }

        Ok(Self {
            accept,
            reject,
            implicit_reject,
        })
    }

    pub fn accept(&self) -> &BTreeSet<String> {
        &self.accept
    }

    pub fn reject(&self) -> &BTreeSet<String> {
        &self.reject
    }

    pub fn implicit_reject(&self) -> &BTreeSet<String> {
        &self.implicit_reject
    }

    /// No concept was labelled at all.
    pub fn is_empty(&self) -> bool {
        self.accept.is_empty() && self.reject.is_empty() && self.implicit_reject.is_empty()
    }

    /// Whether the round carried any explicit accept or reject.
    pub fn has_explicit_labels(&self) -> bool {
        !self.accept.is_empty() || !self.reject.is_empty()
    }

    /// Whether `concept` was labelled in any way.
    pub fn contains(&self, concept: &str) -> bool {
        self.accept.contains(concept)
            || self.reject.contains(concept)
            || self.implicit_reject.contains(concept)
    }

    /// Set-union `other` into this record. Used for the running total, where
    /// the same concept may end up accepted in one round and rejected in another.
    pub(crate) fn absorb(&mut self, other: &Record) {
        self.accept.extend(other.accept.iter().cloned());
        self.reject.extend(other.reject.iter().cloned());
        self.implicit_reject
            .extend(other.implicit_reject.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_sets_are_rejected() {
        let result = Record::try_new(vec!["a b"], vec!["a b"], Vec::<&str>::new());
        assert!(matches!(result, Err(FeedbackError::InvalidRecord { .. })));
    }

    #[test]
    fn duplicates_collapse() {
        let record = Record::try_new(vec!["x", "x"], vec!["y"], vec!["z"]).unwrap();
        assert_eq!(record.accept().len(), 1);
        assert!(record.contains("z"));
        assert!(record.has_explicit_labels());
    }

    #[test]
    fn default_is_empty() {
        let record = Record::default();
        assert!(record.is_empty());
        assert!(!record.has_explicit_labels());
    }
}
