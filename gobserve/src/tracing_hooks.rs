//! Tracing-based observability hooks for service call phases.
//!
//! ```rust
//! use gobserve::TracingObservabilityHooks;
//! use gprovider::ServiceOperationHooks;
//!
//! fn accepts_service_hooks(_hooks: &dyn ServiceOperationHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_service_hooks(&hooks);
//! ```

use gprovider::{ServiceError, ServiceId, ServiceOperationHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ServiceOperationHooks for TracingObservabilityHooks {
    fn on_call_start(&self, service: ServiceId, operation: &str) {
        tracing::info!(
            phase = "service",
            event = "call_start",
            service = %service,
            operation
        );
    }

    fn on_success(&self, service: ServiceId, operation: &str) {
        tracing::info!(
            phase = "service",
            event = "success",
            service = %service,
            operation
        );
    }

    fn on_failure(&self, service: ServiceId, operation: &str, error: &ServiceError) {
        tracing::error!(
            phase = "service",
            event = "failure",
            service = %service,
            operation,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }
}
