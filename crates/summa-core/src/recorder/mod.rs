//! Append-only history of feedback rounds with a running union.

mod flight_recorder;
mod record;

pub use flight_recorder::FlightRecorder;
pub use record::Record;
