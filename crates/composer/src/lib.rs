//! PDF page composition built on lopdf.
//!
//! The centrepiece is a deep object copy between documents: a page
//! dictionary drags its content streams, resources and ancestors along, and
//! the reference graph is cyclic (Page -> Parent -> Kids -> Page), so the
//! copier registers a placeholder id in the target before recursing.

mod error;

pub use error::ComposerError;

use log::debug;
use lopdf::{Document, Object, ObjectId};
use std::collections::HashMap;

/// Tracks which source objects have already been carried over to the target
/// document, so every object is copied once and cycles terminate.
struct ObjectCopier<'a> {
    source: &'a Document,
    target: &'a mut Document,
    copied: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    fn new(source: &'a Document, target: &'a mut Document) -> Self {
        Self { source, target, copied: HashMap::new() }
    }

    /// Deep-copies `source_id` and everything it references, returning the
    /// id the object got in the target document.
    fn copy_object(&mut self, source_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        if let Some(target_id) = self.copied.get(&source_id) {
            return Ok(*target_id);
        }

        // Reserve the target id and record the mapping before recursing,
        // otherwise cyclic references recurse forever. The placeholder is
        // swapped for the real object below.
        let target_id = self.target.add_object(Object::Null);
        self.copied.insert(source_id, target_id);

        let object = self.source.get_object(source_id)?.clone();
        let rewritten = self.rewrite_references(object)?;

        match self.target.objects.get_mut(&target_id) {
            Some(slot) => *slot = rewritten,
            None => return Err(lopdf::Error::ObjectNotFound(target_id)),
        }

        Ok(target_id)
    }

    /// Replaces every `Object::Reference` inside `object` with the id of
    /// the target-side copy, copying referenced objects on demand.
    fn rewrite_references(&mut self, object: Object) -> Result<Object, lopdf::Error> {
        match object {
            Object::Reference(id) => Ok(Object::Reference(self.copy_object(id)?)),
            Object::Array(items) => {
                let items = items
                    .into_iter()
                    .map(|item| self.rewrite_references(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Object::Array(items))
            }
            Object::Dictionary(mut dict) => {
                for (_, value) in dict.iter_mut() {
                    *value = self.rewrite_references(value.clone())?;
                }
                Ok(Object::Dictionary(dict))
            }
            Object::Stream(mut stream) => {
                for (_, value) in stream.dict.iter_mut() {
                    *value = self.rewrite_references(value.clone())?;
                }
                Ok(Object::Stream(stream))
            }
            // Primitives carry no references.
            other => Ok(other),
        }
    }
}

/// Appends every page of `source` to `target`, in source page order.
///
/// All transitively referenced objects are deep-copied under fresh ids, the
/// copied pages are hooked into the target page tree, and their `Parent`
/// entries are rewired. Returns the number of appended pages.
pub fn append_pages(target: &mut Document, source: Document) -> Result<usize, ComposerError> {
    let source_pages = source.get_pages();
    if source_pages.is_empty() {
        return Ok(0);
    }

    let mut copier = ObjectCopier::new(&source, target);
    let mut appended = Vec::with_capacity(source_pages.len());
    // get_pages keys are 1-based page numbers; BTreeMap iteration keeps
    // them in document order.
    for (_, page_id) in source_pages {
        appended.push(copier.copy_object(page_id)?);
    }
    debug!("copied {} pages into target document", appended.len());

    let root_id = target.trailer.get(b"Root")?.as_reference()?;
    let pages_id = target
        .get_object(root_id)?
        .as_dict()?
        .get(b"Pages")?
        .as_reference()?;

    let pages_dict = target.get_object_mut(pages_id)?.as_dict_mut()?;
    let mut kids = pages_dict
        .get(b"Kids")
        .and_then(Object::as_array)
        .map_err(|_| ComposerError::Malformed("page tree has no /Kids array".into()))?
        .clone();
    let count = pages_dict
        .get(b"Count")
        .and_then(Object::as_i64)
        .map_err(|_| ComposerError::Malformed("page tree has no /Count".into()))?;

    kids.extend(appended.iter().map(|id| Object::Reference(*id)));
    pages_dict.set("Kids", Object::Array(kids));
    pages_dict.set("Count", count + appended.len() as i64);

    // The copied pages still point at the source page tree.
    for page_id in &appended {
        if let Ok(Object::Dictionary(page_dict)) = target.get_object_mut(*page_id) {
            page_dict.set("Parent", Object::Reference(pages_id));
        }
    }

    Ok(appended.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Stream, StringFormat, dictionary};

    /// Builds an in-memory document with `num_pages` pages, each carrying a
    /// recognizable text content stream.
    fn sample_document(num_pages: u32, label: &str) -> Document {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = vec![];
        for page_number in 1..=num_pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new(
                        "Tj",
                        vec![Object::String(
                            format!("{label} {page_number}").into_bytes(),
                            StringFormat::Literal,
                        )],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => num_pages as i64,
            }
            .into(),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    #[test]
    fn test_append_extends_page_tree_in_order() {
        let mut target = sample_document(2, "Target");
        let source = sample_document(3, "Source");

        let appended = append_pages(&mut target, source).unwrap();
        assert_eq!(appended, 3);
        assert_eq!(target.get_pages().len(), 5);

        // Source pages come after the target's, in source order.
        let pages = target.get_pages();
        let third = target.get_page_content(*pages.get(&3).unwrap()).unwrap();
        let fifth = target.get_page_content(*pages.get(&5).unwrap()).unwrap();
        assert!(String::from_utf8_lossy(&third).contains("Source 1"));
        assert!(String::from_utf8_lossy(&fifth).contains("Source 3"));
    }

    #[test]
    fn test_append_rewires_parent_references() {
        let mut target = sample_document(1, "Target");
        let source = sample_document(1, "Source");
        append_pages(&mut target, source).unwrap();

        let root_id = target.trailer.get(b"Root").unwrap().as_reference().unwrap();
        let pages_id = target
            .get_object(root_id)
            .unwrap()
            .as_dict()
            .unwrap()
            .get(b"Pages")
            .unwrap()
            .as_reference()
            .unwrap();

        for (_, page_id) in target.get_pages() {
            let parent = target
                .get_object(page_id)
                .unwrap()
                .as_dict()
                .unwrap()
                .get(b"Parent")
                .unwrap()
                .as_reference()
                .unwrap();
            assert_eq!(parent, pages_id);
        }
    }

    #[test]
    fn test_append_empty_source_is_noop() {
        let mut target = sample_document(2, "Target");
        let source = sample_document(0, "Source");
        assert_eq!(append_pages(&mut target, source).unwrap(), 0);
        assert_eq!(target.get_pages().len(), 2);
    }

    #[test]
    fn test_append_shared_resources_copied_once() {
        let mut target = sample_document(1, "Target");
        let source = sample_document(3, "Source");
        let objects_before = target.objects.len();
        append_pages(&mut target, source).unwrap();

        // 3 pages + 3 content streams + one shared resources dict, one font
        // and the source page tree node; far fewer than three full copies.
        let copied = target.objects.len() - objects_before;
        assert!(copied <= 9, "expected shared objects to be deduplicated, copied {copied}");
    }
}
