//! Production-friendly observability hooks for remote service calls.
//!
//! ```rust
//! use gobserve::{MetricsObservabilityHooks, SafeServiceHooks, TracingObservabilityHooks};
//!
//! let _service_hooks = SafeServiceHooks::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::SafeServiceHooks;
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{MetricsObservabilityHooks, SafeServiceHooks, TracingObservabilityHooks};
}
