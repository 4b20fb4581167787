use folio_arena::ArenaError;
use folio_composer::ComposerError;
use folio_geometry::GeometryError;
use thiserror::Error;

/// The kernel-wide error taxonomy.
///
/// Caller-input problems surface as [`Error::InvalidArgument`] before any
/// native resource is allocated; everything else wraps the originating
/// subsystem's error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("resource error: {0}")]
    Arena(#[from] ArenaError),

    #[error("document error: {0}")]
    Document(#[from] ComposerError),
}
