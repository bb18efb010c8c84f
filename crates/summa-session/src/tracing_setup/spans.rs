//! Span definitions per operation: session, iteration, feedback, solve.

/// Create a session span.
#[macro_export]
macro_rules! session_span {
    ($session_id:expr, $store:expr) => {
        tracing::info_span!("summa.session", session_id = %$session_id, store = %$store)
    };
}

/// Create a span for one feedback round.
#[macro_export]
macro_rules! iteration_span {
    ($iteration:expr) => {
        tracing::info_span!("summa.iteration", iteration = $iteration)
    };
}

/// Create a feedback-incorporation span.
#[macro_export]
macro_rules! feedback_span {
    ($store:expr, $accepts:expr, $rejects:expr) => {
        tracing::debug_span!(
            "summa.feedback",
            store = %$store,
            accepts = $accepts,
            rejects = $rejects
        )
    };
}

/// Create an optimizer span.
#[macro_export]
macro_rules! solve_span {
    ($budget:expr, $sentences:expr) => {
        tracing::debug_span!("summa.solve", budget = $budget, sentences = $sentences)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SESSION: &str = "summa.session";
    pub const ITERATION: &str = "summa.iteration";
    pub const FEEDBACK: &str = "summa.feedback";
    pub const SOLVE: &str = "summa.solve";
}
