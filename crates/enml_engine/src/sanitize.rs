//! Whitelist walk over the note body.
//!
//! The walk is synchronous and depth-first: a node is checked before its
//! children, and the children of a dropped node are never looked at. Images
//! that survive are only recorded here; their bytes are fetched afterwards
//! in one batch (see [`convert_media`]).

use enml_core::{
    is_permitted_element, is_prohibited_attribute, resolve_url, Document, NodeId, NodeKind,
    MEDIA_ELEMENT,
};
use enml_logging::enml_trace;

use crate::error::ConvertError;
use crate::session::ConversionSession;
use crate::{ConvertOptions, Fetcher};

/// An `img` element waiting for its resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MediaRef {
    pub(crate) node: NodeId,
    pub(crate) url: String,
}

pub(crate) struct Sanitizer<'a> {
    options: &'a ConvertOptions,
    session: &'a mut ConversionSession,
    media: Vec<MediaRef>,
}

impl<'a> Sanitizer<'a> {
    pub(crate) fn new(options: &'a ConvertOptions, session: &'a mut ConversionSession) -> Self {
        Self {
            options,
            session,
            media: Vec::new(),
        }
    }

    /// Images collected so far, in document order.
    pub(crate) fn into_media(self) -> Vec<MediaRef> {
        self.media
    }

    pub(crate) fn sanitize_children(&mut self, doc: &mut Document, parent: NodeId) -> Result<(), ConvertError> {
        for child in doc.children(parent) {
            self.visit(doc, child)?;
        }
        Ok(())
    }

    fn visit(&mut self, doc: &mut Document, id: NodeId) -> Result<(), ConvertError> {
        let Some(kind) = doc.kind(id) else {
            return Ok(());
        };
        match kind {
            NodeKind::Element(_) => self.visit_element(doc, id),
            NodeKind::Text(_) => Ok(()),
            NodeKind::Comment(_) => {
                if !self.options.include_comments {
                    doc.detach(id);
                }
                Ok(())
            }
            NodeKind::Document | NodeKind::Other => {
                doc.detach(id);
                Ok(())
            }
        }
    }

    fn visit_element(&mut self, doc: &mut Document, id: NodeId) -> Result<(), ConvertError> {
        let Some(tag) = doc.element(id).map(|e| e.name().to_ascii_lowercase()) else {
            return Ok(());
        };

        if !is_permitted_element(&tag) {
            doc.detach(id);
            if self.options.strict {
                return Err(ConvertError::IllegalElement(tag));
            }
            self.session.warn(format!("Dropped illegal element ({tag})"));
            return Ok(());
        }

        if !self.convert_attributes(doc, id, &tag) {
            return Ok(());
        }
        self.sanitize_children(doc, id)
    }

    /// Attribute pass. Returns `false` when the element itself was dropped.
    fn convert_attributes(&mut self, doc: &mut Document, id: NodeId, tag: &str) -> bool {
        let attrs = doc
            .element(id)
            .map(|e| e.attrs().to_vec())
            .unwrap_or_default();

        for attr in attrs {
            let name = attr.name.to_ascii_lowercase();
            if is_prohibited_attribute(&name) {
                enml_trace!("Stripping attribute {} from <{}>", attr.name, tag);
                doc.update_element(id, |e| e.remove_attr(&attr.name));
                continue;
            }

            match (tag, name.as_str()) {
                ("a", "href") => match resolve_url(&attr.value, &self.options.base_url) {
                    Some(url) => {
                        doc.update_element(id, |e| e.set_attr(&attr.name, url));
                    }
                    None => {
                        doc.update_element(id, |e| e.remove_attr(&attr.name));
                        self.session.warn("Removed empty link target");
                    }
                },
                ("img", "src") => {
                    if self.options.ignore_files {
                        doc.detach(id);
                        return false;
                    }
                    let Some(url) = resolve_url(&attr.value, &self.options.base_url) else {
                        doc.detach(id);
                        self.session.warn("Dropped image without source");
                        return false;
                    };
                    doc.update_element(id, |e| e.set_attr(&attr.name, url.as_str()));
                    self.media.push(MediaRef { node: id, url });
                }
                _ => {}
            }
        }
        true
    }
}

/// Fetch every collected image and turn each into an `en-media` element.
///
/// All fetches are settled before any element is touched. Elements whose
/// resource failed are dropped, or the whole conversion fails in strict mode
/// with the first failure in document order.
pub(crate) async fn convert_media(
    doc: &mut Document,
    media: Vec<MediaRef>,
    session: &mut ConversionSession,
    fetcher: &dyn Fetcher,
    options: &ConvertOptions,
) -> Result<(), ConvertError> {
    if media.is_empty() {
        return Ok(());
    }

    let urls: Vec<String> = media.iter().map(|m| m.url.clone()).collect();
    session
        .resources
        .fetch_all(&urls, fetcher, options.fetch.max_concurrent_fetches)
        .await;

    for item in media {
        let outcome = match session.resources.outcome(&item.url) {
            Some(Ok(record)) => Ok((record.hash.clone(), record.mime.clone())),
            Some(Err(err)) => Err(err.clone()),
            None => continue,
        };
        match outcome {
            Ok((hash, mime)) => {
                doc.update_element(item.node, |e| {
                    e.rename(MEDIA_ELEMENT);
                    e.remove_attr("src");
                    e.set_attr("hash", hash);
                    e.set_attr("type", mime);
                });
            }
            Err(err) => {
                doc.detach(item.node);
                if options.strict {
                    return Err(err.into());
                }
                session.warn(format!("Dropped image: {err}"));
            }
        }
    }
    Ok(())
}
