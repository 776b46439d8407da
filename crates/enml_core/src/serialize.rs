//! XML serialization of the arena document.

use ego_tree::NodeId;

use crate::dom::{Document, NodeKind};

/// Fixed prologue of every ENML document.
pub const ENML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><!DOCTYPE en-note SYSTEM \"http://xml.evernote.com/pub/enml2.dtd\">";

/// Elements written in self-closing form when they have no children.
const VOID_ELEMENTS: &[&str] = &["area", "br", "col", "hr", "img"];

/// Serialize the subtree rooted at `id` as XML.
pub fn serialize_node(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    write_node(&mut out, doc, id);
    out
}

/// Serialize the subtree rooted at `note` and prepend [`ENML_HEADER`].
pub fn to_enml(doc: &Document, note: NodeId) -> String {
    let mut out = String::from(ENML_HEADER);
    write_node(&mut out, doc, note);
    out
}

fn write_node(out: &mut String, doc: &Document, id: NodeId) {
    let Some(kind) = doc.kind(id) else {
        return;
    };
    match kind {
        NodeKind::Document => {
            for child in doc.children(id) {
                write_node(out, doc, child);
            }
        }
        NodeKind::Element(element) => {
            let name = element.name();
            out.push('<');
            out.push_str(name);
            for attr in element.attrs() {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                escape_into(out, &attr.value, true);
                out.push('"');
            }
            let children = doc.children(id);
            if children.is_empty() && VOID_ELEMENTS.contains(&name) {
                out.push_str("/>");
                return;
            }
            out.push('>');
            for child in children {
                write_node(out, doc, child);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        NodeKind::Text(text) => escape_into(out, text, false),
        NodeKind::Comment(comment) => {
            out.push_str("<!--");
            write_comment_text(out, comment);
            out.push_str("-->");
        }
        NodeKind::Other => {}
    }
}

fn escape_into(out: &mut String, text: &str, in_attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '\n' if in_attribute => out.push_str("&#10;"),
            '\r' if in_attribute => out.push_str("&#13;"),
            '\t' if in_attribute => out.push_str("&#9;"),
            _ => out.push(ch),
        }
    }
}

/// XML comments may not contain `--` nor end in `-`; split such runs with a space.
fn write_comment_text(out: &mut String, text: &str) {
    let mut previous = None;
    for ch in text.chars() {
        if ch == '-' && previous == Some('-') {
            out.push(' ');
        }
        out.push(ch);
        previous = Some(ch);
    }
    if previous == Some('-') {
        out.push(' ');
    }
}
