use std::panic::{AssertUnwindSafe, catch_unwind};

use gprovider::{ServiceError, ServiceId, ServiceOperationHooks};

/// Wraps another hook implementation so a panicking hook never takes a
/// service call down with it.
pub struct SafeServiceHooks<H> {
    inner: H,
}

impl<H> SafeServiceHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ServiceOperationHooks for SafeServiceHooks<H>
where
    H: ServiceOperationHooks,
{
    fn on_call_start(&self, service: ServiceId, operation: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_call_start(service, operation)
        }));
    }

    fn on_success(&self, service: ServiceId, operation: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(service, operation)
        }));
    }

    fn on_failure(&self, service: ServiceId, operation: &str, error: &ServiceError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(service, operation, error)
        }));
    }
}
