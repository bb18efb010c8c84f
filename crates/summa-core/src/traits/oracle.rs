use crate::errors::SummaResult;
use crate::recorder::{FlightRecorder, Record};

/// The source of accept/reject labels, simulated or human.
pub trait IOracle: Send + Sync {
    /// Label the candidate concepts. Concepts already labelled in `recorder`
    /// are not labelled again.
    fn get_labels(&self, samples: &[String], recorder: &FlightRecorder) -> SummaResult<Record>;
}
