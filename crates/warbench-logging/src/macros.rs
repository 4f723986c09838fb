//! ---
//! wb_section: "03-logging"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Structured logging adapters for scenario execution."
//! wb_version: "v0.0.0-prealpha"
//! wb_owner: "tbd"
//! ---
/// Shared expansion for the level-specific macros. Not part of the public API.
#[doc(hidden)]
#[macro_export]
macro_rules! __wb_event {
    ($level:expr, $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            $level,
            scenario = ctx.scenario.unwrap_or(""),
            step = ctx.step.unwrap_or(""),
            workload = ctx.workload.unwrap_or(""),
            iterations = ctx.iterations.unwrap_or_default(),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit an informational log enriched with scenario context.
#[macro_export]
macro_rules! wb_info {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__wb_event!(tracing::Level::INFO, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__wb_event!(tracing::Level::INFO, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a debug log enriched with scenario context.
#[macro_export]
macro_rules! wb_debug {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__wb_event!(tracing::Level::DEBUG, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__wb_event!(tracing::Level::DEBUG, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a warning enriched with scenario context.
#[macro_export]
macro_rules! wb_warn {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__wb_event!(tracing::Level::WARN, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__wb_event!(tracing::Level::WARN, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit an error log enriched with scenario context.
#[macro_export]
macro_rules! wb_error {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__wb_event!(tracing::Level::ERROR, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__wb_event!(tracing::Level::ERROR, $crate::LogContext::default(), $($arg)+)
    };
}
