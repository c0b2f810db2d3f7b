//! Span macros and recording helpers

/// Create a span for one learner decision
///
/// Declares `outcome`, `chosen_index`, `duration_ms` and `error` as empty
/// fields so they can be recorded once the step finishes.
///
/// # Example
///
/// ```rust
/// use cyber_observability::policy_step_span;
///
/// let span = policy_step_span!("exploit", "gpt-4");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! policy_step_span {
    ($phase:expr, $model:expr) => {
        tracing::info_span!(
            "policy.step",
            phase = $phase,
            model = $model,
            outcome = tracing::field::Empty,
            chosen_index = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
        )
    };
}

/// Create a span for one outbound model call
///
/// # Example
///
/// ```rust
/// use cyber_observability::model_call_span;
///
/// let span = model_call_span!("gpt-4", 5u32);
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! model_call_span {
    ($model:expr, $candidates:expr) => {
        tracing::debug_span!(
            "model.call",
            model = $model,
            requested = $candidates,
            returned = tracing::field::Empty,
            error = tracing::field::Empty,
        )
    };
}

/// Record an error on `span` and emit an error event inside it
pub fn record_error<E: std::error::Error>(span: &tracing::Span, error: &E) {
    span.record("error", tracing::field::display(error));
    span.in_scope(|| tracing::error!(error = %error, "operation failed"));
}

/// Record a duration in milliseconds on `span` under `key`
///
/// `key` must be a field the span declared, e.g. `duration_ms`.
pub fn record_duration(span: &tracing::Span, key: &str, duration: std::time::Duration) {
    span.record(key, duration.as_millis() as u64);
}
