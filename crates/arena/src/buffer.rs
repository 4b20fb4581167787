use crate::context::{Context, Lease, ResourceKind};
use crate::ArenaError;
use log::warn;
use std::fmt;

/// A growable byte container allocated under a [`Context`].
///
/// A buffer must be given back with [`Buffer::release`] exactly once;
/// `release` consumes the buffer, so a double release does not compile.
/// Dropping a buffer without releasing it keeps the context's accounting
/// exact but logs a leak warning.
///
/// [`Buffer::data`] hands out a borrowed view, so holding a view across a
/// mutating call like [`Buffer::append`] is rejected at compile time.
pub struct Buffer {
    data: Vec<u8>,
    lease: Option<Lease>,
}

impl Buffer {
    /// Allocates a buffer with at least `capacity` bytes reserved.
    /// A capacity of zero is valid and yields an empty, growable buffer.
    pub fn with_capacity(ctx: &Context, capacity: usize) -> Result<Self, ArenaError> {
        let mut data = Vec::new();
        data.try_reserve(capacity)
            .map_err(|_| ArenaError::Allocation { requested: capacity })?;
        Ok(Self { data, lease: Some(ctx.lease(ResourceKind::Buffer)) })
    }

    /// Allocates a buffer holding a verbatim copy of `bytes`.
    pub fn from_bytes(ctx: &Context, bytes: &[u8]) -> Result<Self, ArenaError> {
        let mut buffer = Self::with_capacity(ctx, bytes.len())?;
        buffer.data.extend_from_slice(bytes);
        Ok(buffer)
    }

    /// Appends `bytes`, growing storage as needed. Fails only on true
    /// resource exhaustion.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), ArenaError> {
        self.data
            .try_reserve(bytes.len())
            .map_err(|_| ArenaError::Allocation { requested: bytes.len() })?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current contents. The borrow ends before the next mutation.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Explicit teardown; gives the context slot back.
    pub fn release(mut self) {
        if let Some(lease) = self.lease.take() {
            lease.release();
        }
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer").field("len", &self.data.len()).finish()
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        if let Some(lease) = self.lease.take() {
            warn!(
                "buffer of {} bytes dropped without an explicit release",
                self.data.len()
            );
            lease.release();
        }
    }
}
