// Single source of truth for all default values.

// --- Feedback: shared ---
pub const DEFAULT_NGRAM_SIZE: usize = 2;
pub const DEFAULT_CUT_OFF_THRESHOLD: f64 = 0.4;
pub const DEFAULT_MASS_ACCEPT: f64 = 1.0;
pub const DEFAULT_MASS_REJECT: f64 = -1.0;
pub const DEFAULT_ITERATIONS_ACCEPT: usize = 1;
pub const DEFAULT_ITERATIONS_REJECT: usize = 1;

// --- Feedback: baseline ---
pub const DEFAULT_TOP_N: usize = 400;

// --- Feedback: pagerank ---
pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_PAGERANK_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_PAGERANK_TOLERANCE: f64 = 1.0e-6;

// --- Feedback: n-gram ---
pub const DEFAULT_FACTOR_ACCEPT: f64 = 2.0;
pub const DEFAULT_FACTOR_REJECT: f64 = 0.5;

// --- Feedback: random walk ---
pub const DEFAULT_PROPAGATION_ABORT_THRESHOLD: f64 = 0.1;
pub const DEFAULT_RANDOM_SEED: u64 = 42;

// --- Feedback: ego pagerank ---
pub const DEFAULT_EGO_DEPTH: usize = 1;
pub const DEFAULT_TAX: f64 = 0.5;

// --- Embedding ---
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 300;

// --- Session ---
pub const DEFAULT_MAX_ITERATION_COUNT: usize = 25;
pub const DEFAULT_SUMMARY_LENGTH: usize = 100;
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
