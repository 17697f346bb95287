/// Standardized logging macros for consistent field names and message patterns
///
/// Every macro expands to a `tracing` event carrying a fixed set of fields so
/// that console and file output can be filtered the same way.

// ============================================================================
// Content Generation Logging Macros
// ============================================================================

/// Log content generation steps with request sequence context
#[macro_export]
macro_rules! log_generation {
    (start, $operation:expr, sequence = $seq:expr, text_length = $len:expr) => {
        tracing::info!(
            component = "content_service",
            operation = $operation,
            sequence = $seq,
            text_length = $len,
            "Generation request issued"
        );
    };
    (start, $operation:expr, text_length = $len:expr) => {
        tracing::info!(
            component = "content_service",
            operation = $operation,
            text_length = $len,
            "Generation started"
        );
    };
    (remote_failed, $operation:expr, backend = $backend:expr, error = $error:expr) => {
        tracing::warn!(
            component = "content_service",
            operation = $operation,
            backend = $backend,
            error_kind = $error.kind(),
            error = %$error,
            "Remote generation failed, using local fallback"
        );
    };
    (success, $operation:expr, source = $source:expr, items = $items:expr) => {
        tracing::info!(
            component = "content_service",
            operation = $operation,
            source = %$source,
            items = $items,
            "Generation completed"
        );
    };
    (stale, $operation:expr, sequence = $seq:expr, latest = $latest:expr) => {
        tracing::debug!(
            component = "content_service",
            operation = $operation,
            sequence = $seq,
            latest = $latest,
            "Discarding superseded generation result"
        );
    };
}

// ============================================================================
// Quiz Session Logging Macros
// ============================================================================

/// Log quiz state transitions and rejected operations
#[macro_export]
macro_rules! log_quiz_event {
    (transition, $operation:expr, run_id = $run_id:expr, phase = $phase:expr) => {
        tracing::debug!(
            component = "quiz_session",
            operation = $operation,
            run_id = %$run_id,
            phase = %$phase,
            "Quiz transition"
        );
    };
    (answered, run_id = $run_id:expr, index = $index:expr, correct = $correct:expr, score = $score:expr) => {
        tracing::debug!(
            component = "quiz_session",
            operation = "submit_answer",
            run_id = %$run_id,
            question_index = $index,
            is_correct = $correct,
            score = $score,
            "Answer graded"
        );
    };
    (rejected, $operation:expr, run_id = $run_id:expr, error = $error:expr) => {
        tracing::warn!(
            component = "quiz_session",
            operation = $operation,
            run_id = %$run_id,
            error = %$error,
            "Quiz operation rejected"
        );
    };
}

// ============================================================================
// System Event Logging Macros
// ============================================================================

/// Log system startup and shutdown events
#[macro_export]
macro_rules! log_system_event {
    (startup, component = $component:expr, $msg:expr) => {
        tracing::info!(
            event_type = "startup",
            component = $component,
            "System event: {}",
            $msg
        );
    };
    (shutdown, component = $component:expr, $msg:expr) => {
        tracing::info!(
            event_type = "shutdown",
            component = $component,
            "System event: {}",
            $msg
        );
    };
    (config, $msg:expr) => {
        tracing::info!(event_type = "configuration", "System event: {}", $msg);
    };
}

// ============================================================================
// Validation Logging Macros
// ============================================================================

/// Log validation results consistently
#[macro_export]
macro_rules! log_validation {
    (success, $component:expr, $msg:expr) => {
        tracing::debug!(
            event_type = "validation",
            component = $component,
            result = "success",
            "Validation completed: {}", $msg
        );
    };
    (failure, $component:expr, error = $error:expr) => {
        tracing::warn!(
            event_type = "validation",
            component = $component,
            result = "failure",
            error = %$error,
            "Validation failed"
        );
    };
}
