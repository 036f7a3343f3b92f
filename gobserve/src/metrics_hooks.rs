//! Metrics-based observability hooks for service call phases.
//!
//! ```rust
//! use gobserve::MetricsObservabilityHooks;
//! use gprovider::ServiceOperationHooks;
//!
//! fn accepts_service_hooks(_hooks: &dyn ServiceOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_service_hooks(&hooks);
//! ```

use gprovider::{ServiceError, ServiceId, ServiceOperationHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ServiceOperationHooks for MetricsObservabilityHooks {
    fn on_call_start(&self, service: ServiceId, operation: &str) {
        metrics::counter!(
            "galley_service_call_start_total",
            "service" => service.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_success(&self, service: ServiceId, operation: &str) {
        metrics::counter!(
            "galley_service_success_total",
            "service" => service.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_failure(&self, service: ServiceId, operation: &str, error: &ServiceError) {
        metrics::counter!(
            "galley_service_failure_total",
            "service" => service.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }
}
