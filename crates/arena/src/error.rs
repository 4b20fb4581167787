use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// Storage growth failed. Treated as fatal by convention; callers are
    /// not expected to recover beyond reporting.
    #[error("failed to allocate {requested} bytes")]
    Allocation { requested: usize },

    /// A context was destroyed while resources allocated under it were
    /// still live.
    #[error("context destroyed while {live} resources are still live")]
    ContextBusy { live: usize },
}
