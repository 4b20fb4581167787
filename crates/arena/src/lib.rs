//! Explicit-lifecycle resource model: a [`Context`] arena that accounts for
//! every resource allocated under it, and [`Buffer`], a growable byte
//! container tied to a context.
//!
//! The discipline is acquire/explicit-release: every allocation takes a
//! [`Lease`] on its context, and the lease comes back either through an
//! explicit `release` or through scope exit. The context's live count is the
//! leak oracle; tearing a context down while leases are outstanding is the
//! guarded programming error.

mod buffer;
mod context;
mod error;

pub use buffer::Buffer;
pub use context::{Context, Lease, ResourceKind};
pub use error::ArenaError;
