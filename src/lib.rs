//! folio — the geometry and native-resource kernel underlying a PDF
//! processing library.
//!
//! Three concerns live here:
//!
//! - **Geometry algebra** ([`Point`], [`Matrix`], [`Rect`], [`IRect`],
//!   [`Quad`]): immutable value types with precise affine semantics.
//! - **Resource model** ([`Context`], [`Buffer`]): deterministic
//!   acquire/explicit-release lifetimes with leak accounting.
//! - **Document composition** ([`merge_pdfs`]): concatenates the page
//!   sequences of several PDFs through context-scoped handles.
//!
//! ```no_run
//! use folio::{Context, merge_pdfs};
//!
//! # fn main() -> Result<(), folio::Error> {
//! let ctx = Context::new();
//! let pages = merge_pdfs(&["a.pdf", "b.pdf"], "merged.pdf", Some(&ctx))?;
//! println!("merged {pages} pages");
//! ctx.destroy()?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod merge;

pub use error::Error;
pub use merge::merge_pdfs;

pub use folio_arena::{ArenaError, Buffer, Context, Lease, ResourceKind};
pub use folio_composer::ComposerError;
pub use folio_geometry::{GeometryError, IRect, Matrix, Point, Quad, Rect};
