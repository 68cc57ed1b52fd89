//! Structured logging utilities.
//!
//! Provides context-aware logging with the evaluation id and, once the
//! schema is registered, the resource it was compiled under.

use std::fmt;

/// Logging context for a single evaluation.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub evaluation_id: String,
    pub resource: Option<String>,
}

impl LogContext {
    pub fn new(evaluation_id: &str) -> Self {
        Self {
            evaluation_id: evaluation_id.to_string(),
            resource: None,
        }
    }

    pub fn with_resource(&self, resource: &str) -> Self {
        Self {
            evaluation_id: self.evaluation_id.clone(),
            resource: Some(resource.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resource {
            Some(resource) => write!(f, "[eval={}] [resource={}]", self.evaluation_id, resource),
            None => write!(f, "[eval={}]", self.evaluation_id),
        }
    }
}

/// Log an info message with context.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::info!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log a warning message with context.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::warn!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log an error message with context.
#[macro_export]
macro_rules! log_error {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::error!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::debug!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_display() {
        let ctx = LogContext::new("eval-123");
        assert_eq!(format!("{}", ctx), "[eval=eval-123]");

        let ctx_with_resource = ctx.with_resource("schema.json");
        assert_eq!(
            format!("{}", ctx_with_resource),
            "[eval=eval-123] [resource=schema.json]"
        );
    }

    #[test]
    fn test_macros_accept_any_number_of_fields() {
        let ctx = LogContext::new("eval-123");
        crate::log_debug!(ctx, "NO_FIELDS");
        crate::log_info!(ctx, "ONE_FIELD", valid = true);
        crate::log_warn!(ctx, "TWO_FIELDS", valid = false, errors = 2usize,);
        crate::log_error!(&ctx, "STRING_FIELD", reason = "boom");
    }
}
