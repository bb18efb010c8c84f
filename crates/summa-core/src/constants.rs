/// summa version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Feedback value written when a concept is accepted.
pub const ACCEPT_VALUE: f64 = 1.0;

/// Feedback value written when a concept is rejected.
pub const REJECT_VALUE: f64 = 0.0;

/// Lower bound of every weight handed to the optimizer.
pub const MIN_WEIGHT: f64 = 0.0;

/// Upper bound of every weight handed to the optimizer.
pub const MAX_WEIGHT: f64 = 1.0;

/// Separator between the tokens of an n-gram concept key.
pub const NGRAM_SEPARATOR: &str = " ";
