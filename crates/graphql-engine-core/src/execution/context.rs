use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

/// Per-request state threaded through execution: cancellation, an
/// optional deadline and the host's request data.
///
/// Clones share the cancellation flag, so a clone kept by the caller can
/// cancel an execution running elsewhere.
#[derive(Clone, Default)]
pub struct ExecutionContext {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
    data: Option<Arc<dyn Any + Send + Sync>>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Attaches host data that resolvers read back with
    /// [`ResolveContext::data`](crate::ResolveContext::data).
    pub fn with_data<T: Any + Send + Sync>(mut self, data: T) -> Self {
        self.data = Some(Arc::new(data));
        self
    }

    pub fn data<T: Any>(&self) -> Option<&T> {
        self.data.as_deref().and_then(|data| data.downcast_ref::<T>())
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Stops the scheduling of further field resolutions. Resolvers already
    /// running are left to finish.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Cancelled explicitly, or past the deadline.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("cancelled", &self.cancelled.load(Ordering::SeqCst))
            .field("deadline", &self.deadline)
            .field("has_data", &self.data.is_some())
            .finish()
    }
}
