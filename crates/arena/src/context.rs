use crate::ArenaError;
use log::warn;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// What a [`Lease`] stands for. Only used for diagnostics; the accounting
/// itself is uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Buffer,
    Document,
}

impl ResourceKind {
    fn label(self) -> &'static str {
        match self {
            ResourceKind::Buffer => "buffer",
            ResourceKind::Document => "document",
        }
    }
}

#[derive(Debug, Default)]
struct ContextState {
    live: AtomicUsize,
    destroyed: AtomicBool,
}

/// The allocation arena. One logical owner drives a context at a time;
/// concurrent mutation of resources under a shared context requires external
/// locking by the caller.
///
/// A context must be torn down exactly once via [`Context::destroy`], which
/// consumes the handle, making use-after-destroy unrepresentable. Dropping a
/// context that still has live resources logs a leak warning instead.
pub struct Context {
    state: Arc<ContextState>,
}

impl Context {
    pub fn new() -> Self {
        Self { state: Arc::new(ContextState::default()) }
    }

    /// Number of resources currently allocated under this context.
    pub fn live_resources(&self) -> usize {
        self.state.live.load(Ordering::Acquire)
    }

    /// Takes out a lease for a resource of the given kind. The live count
    /// stays raised until the lease is released or dropped.
    pub fn lease(&self, kind: ResourceKind) -> Lease {
        self.state.live.fetch_add(1, Ordering::AcqRel);
        Lease { state: Arc::clone(&self.state), kind, released: false }
    }

    /// Tears the arena down. Must be the last operation on the context;
    /// consuming `self` makes that a compile-time guarantee.
    ///
    /// Destroying while resources are still live is a programming error and
    /// reported as [`ArenaError::ContextBusy`]; the arena is torn down
    /// regardless, and the stragglers log a warning when they release.
    pub fn destroy(self) -> Result<(), ArenaError> {
        self.state.destroyed.store(true, Ordering::Release);
        let live = self.state.live.load(Ordering::Acquire);
        if live > 0 {
            warn!("context destroyed with {live} live resources");
            return Err(ArenaError::ContextBusy { live });
        }
        Ok(())
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("live", &self.live_resources())
            .finish()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        if !self.state.destroyed.load(Ordering::Acquire) {
            let live = self.state.live.load(Ordering::Acquire);
            if live > 0 {
                warn!("context dropped without destroy while {live} resources are live");
            }
        }
    }
}

/// A claim on one resource slot in a [`Context`].
///
/// Releasing is idempotent by construction: [`Lease::release`] consumes the
/// lease, and plain scope exit releases it too (the scoped-acquisition
/// pattern used by callers that tie cleanup to a block).
#[derive(Debug)]
pub struct Lease {
    state: Arc<ContextState>,
    kind: ResourceKind,
    released: bool,
}

impl Lease {
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Explicitly gives the slot back.
    pub fn release(mut self) {
        self.settle();
    }

    fn settle(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if self.state.destroyed.load(Ordering::Acquire) {
            warn!("{} released after its context was destroyed", self.kind.label());
        }
        self.state.live.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.settle();
    }
}
