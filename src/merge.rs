//! High-level document merge: concatenate the page sequences of several
//! PDFs into one output file.

use crate::error::Error;
use folio_arena::{Context, ResourceKind};
use folio_composer::{ComposerError, append_pages};
use log::{debug, info};
use lopdf::Document;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Merges `input_paths` (in order) into a single PDF at `output_path` and
/// returns the total page count of the merged document.
///
/// Arguments are validated before any resource is allocated: an empty input
/// list or an empty output path yields [`Error::InvalidArgument`] with
/// nothing to clean up. When `ctx` is `None`, a private [`Context`] is
/// created for the call and destroyed on every exit path; every input
/// document is held under a context lease, so after a failure the context
/// reports `live_resources() == 0`.
///
/// The output file is created only at the final save step. Failures before
/// the save leave no file behind; a failure during the save itself may
/// leave a partial file.
pub fn merge_pdfs<P, Q>(
    input_paths: &[P],
    output_path: Q,
    ctx: Option<&Context>,
) -> Result<usize, Error>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let Some((first, rest)) = input_paths.split_first() else {
        return Err(Error::InvalidArgument("no input paths given".into()));
    };
    let output_path = output_path.as_ref();
    if output_path.as_os_str().is_empty() {
        return Err(Error::InvalidArgument("output path is empty".into()));
    }

    let mut private = None;
    let ctx = match ctx {
        Some(ctx) => ctx,
        None => private.insert(Context::new()),
    };

    let result = merge_into(ctx, first.as_ref(), rest, output_path);

    if let Some(private) = private {
        // merge_into released every document lease before returning, so
        // this only fails if the accounting itself went wrong.
        if let Err(err) = private.destroy()
            && result.is_ok()
        {
            return Err(err.into());
        }
    }
    result
}

fn merge_into<P: AsRef<Path>>(
    ctx: &Context,
    first: &Path,
    rest: &[P],
    output_path: &Path,
) -> Result<usize, Error> {
    let base_lease = ctx.lease(ResourceKind::Document);
    let mut target = open_input(first)?;
    let mut total = target.get_pages().len();

    for input in rest {
        let input = input.as_ref();
        let source_lease = ctx.lease(ResourceKind::Document);
        let source = open_input(input)?;
        total += append_pages(&mut target, source)?;
        source_lease.release();
    }

    info!(
        "writing {} merged pages to {}",
        total,
        output_path.display()
    );
    let save_result = save_output(&mut target, output_path);
    drop(target);
    base_lease.release();
    save_result?;

    Ok(total)
}

fn open_input(path: &Path) -> Result<Document, Error> {
    debug!("opening input {}", path.display());
    Document::load(path).map_err(|err| Error::Document(err.into()))
}

fn save_output(document: &mut Document, path: &Path) -> Result<(), Error> {
    let file = File::create(path).map_err(ComposerError::from)?;
    let mut writer = BufWriter::new(file);
    document.save_to(&mut writer).map_err(ComposerError::from)?;
    Ok(())
}
