//! html2enml core: pure building blocks of the ENML conversion.
mod dom;
mod error;
mod mime;
mod resolve;
mod serialize;
mod whitelist;

pub use dom::{Attribute, Document, Element, NodeKind, ParsedDocument, MAX_NESTING_DEPTH};
pub use ego_tree::NodeId;
pub use error::ParseError;
pub use mime::{detect_mime_type, mime_type_from_extension, sniff_mime_type};
pub use resolve::{has_permitted_scheme, resolve_url, PERMITTED_SCHEMES};
pub use serialize::{serialize_node, to_enml, ENML_HEADER};
pub use whitelist::{
    is_permitted_element, is_prohibited_attribute, MEDIA_ELEMENT, NOTE_ROOT, PERMITTED_ELEMENTS,
    PROHIBITED_ATTRIBUTES,
};
