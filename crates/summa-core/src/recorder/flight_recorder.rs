use serde::{Deserialize, Serialize};

use super::record::Record;
use crate::errors::FeedbackError;

/// Keeps every feedback round in order, plus the union of all of them.
///
/// `union().accept()` is always the union of `accept` over all recorded rounds
/// (likewise for reject and implicit reject). Nothing shrinks until `clear()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightRecorder {
    records: Vec<Record>,
    total: Record,
}

impl FlightRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one feedback round.
    pub fn record<A, R, I, S>(
        &mut self,
        accept: A,
        reject: R,
        implicit_reject: I,
    ) -> Result<&Record, FeedbackError>
    where
        A: IntoIterator<Item = S>,
        R: IntoIterator<Item = S>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let record = Record::try_new(accept, reject, implicit_reject)?;
        Ok(self.add_record(record))
    }

    /// Append an already built record.
    pub fn add_record(&mut self, record: Record) -> &Record {
        self.total.absorb(&record);
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// The most recent round, or an empty record before the first one.
    pub fn latest(&self) -> Record {
        self.records.last().cloned().unwrap_or_default()
    }

    /// Cumulative view over the whole session.
    pub fn union(&self) -> &Record {
        &self.total
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Back to the initial state: no records, empty union.
    pub fn clear(&mut self) {
        self.records.clear();
        self.total = Record::default();
    }
}
