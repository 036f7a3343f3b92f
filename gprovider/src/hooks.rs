//! Operational hook contracts for remote service calls.
//!
//! ```rust
//! use gprovider::{NoopOperationHooks, ServiceOperationHooks};
//!
//! fn accepts_hooks(_hooks: &dyn ServiceOperationHooks) {}
//!
//! accepts_hooks(&NoopOperationHooks);
//! ```

use std::future::Future;

use crate::{ServiceError, ServiceId};

pub trait ServiceOperationHooks: Send + Sync {
    fn on_call_start(&self, _service: ServiceId, _operation: &str) {}

    fn on_success(&self, _service: ServiceId, _operation: &str) {}

    fn on_failure(&self, _service: ServiceId, _operation: &str, _error: &ServiceError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ServiceOperationHooks for NoopOperationHooks {}

/// Runs one remote call and reports its outcome through the hooks.
pub async fn observe_call<T, F>(
    service: ServiceId,
    operation: &str,
    hooks: &dyn ServiceOperationHooks,
    call: F,
) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    hooks.on_call_start(service, operation);

    match call.await {
        Ok(value) => {
            hooks.on_success(service, operation);
            Ok(value)
        }
        Err(error) => {
            hooks.on_failure(service, operation, &error);
            Err(error)
        }
    }
}
