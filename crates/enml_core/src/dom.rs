//! Mutable arena document.
//!
//! Nodes live in an [`ego_tree::Tree`] and are addressed by [`NodeId`].
//! Removing a node detaches it from its parent; the id stays valid and the
//! node simply stops being reachable from the root.

use ego_tree::{NodeId, NodeRef, Tree};
use scraper::{Html, Node};

use crate::error::ParseError;

/// Deepest element nesting accepted from the parser.
pub const MAX_NESTING_DEPTH: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attrs: Vec<Attribute>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Case-insensitive attribute lookup.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Replaces the value of an existing attribute in place, or appends a new one.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attrs
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            Some(existing) => existing.value = value,
            None => self.attrs.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self
            .attrs
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))?;
        Some(self.attrs.remove(idx).value)
    }

    /// Drops every attribute for which `predicate` returns true.
    pub fn remove_attrs_where(&mut self, mut predicate: impl FnMut(&Attribute) -> bool) {
        self.attrs.retain(|a| !predicate(a));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element(Element),
    Text(String),
    Comment(String),
    /// Doctypes, processing instructions and anything else the parser emits.
    Other,
}

#[derive(Debug, Clone)]
pub struct Document {
    tree: Tree<NodeKind>,
}

/// A parsed document together with the recoverable errors the parser reported.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub document: Document,
    pub errors: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            tree: Tree::new(NodeKind::Document),
        }
    }

    /// Parse an HTML document.
    ///
    /// The HTML parser recovers from malformed markup on its own; its
    /// complaints are returned in [`ParsedDocument::errors`]. Only documents
    /// nested deeper than [`MAX_NESTING_DEPTH`] are rejected.
    pub fn parse(html: &str) -> Result<ParsedDocument, ParseError> {
        let parsed = Html::parse_document(html);
        let mut document = Document::new();
        let root = document.root();
        for child in parsed.tree.root().children() {
            copy_subtree(child, &mut document.tree, root, 1)?;
        }
        Ok(ParsedDocument {
            document,
            errors: parsed.errors.iter().map(|e| e.to_string()).collect(),
        })
    }

    pub fn root(&self) -> NodeId {
        self.tree.root().id()
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.tree.get(id).map(|node| node.value())
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.kind(id)? {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Runs `f` on the element at `id`; `None` if `id` is not an element.
    pub fn update_element<R>(&mut self, id: NodeId, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
        let mut node = self.tree.get_mut(id)?;
        match node.value() {
            NodeKind::Element(element) => Some(f(element)),
            _ => None,
        }
    }

    /// Snapshot of the current children, safe to iterate while detaching.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .get(id)
            .map(|node| node.children().map(|c| c.id()).collect())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id)?.parent().map(|p| p.id())
    }

    /// Appends a new node under `parent` and returns its id.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> Option<NodeId> {
        let mut node = self.tree.get_mut(parent)?;
        Some(node.append(kind).id())
    }

    /// Detach `id` and its subtree from the document.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.tree.get_mut(id) {
            node.detach();
        }
    }

    /// True while `id` can still be reached from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let root = self.root();
        let mut current = Some(id);
        while let Some(node) = current {
            if node == root {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// First element with the given tag name in document order.
    pub fn find_element(&self, name: &str) -> Option<NodeId> {
        self.tree
            .root()
            .descendants()
            .find(|node| match node.value() {
                NodeKind::Element(element) => element.name().eq_ignore_ascii_case(name),
                _ => false,
            })
            .map(|node| node.id())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn copy_subtree(
    source: NodeRef<'_, Node>,
    target: &mut Tree<NodeKind>,
    parent: NodeId,
    depth: usize,
) -> Result<(), ParseError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ParseError::TooDeep {
            max_depth: MAX_NESTING_DEPTH,
        });
    }
    let kind = match source.value() {
        Node::Document | Node::Fragment => NodeKind::Document,
        Node::Element(element) => NodeKind::Element(Element {
            name: element.name().to_string(),
            attrs: element
                .attrs()
                .map(|(name, value)| Attribute {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }),
        Node::Text(text) => NodeKind::Text(text.to_string()),
        Node::Comment(comment) => NodeKind::Comment(comment.to_string()),
        _ => NodeKind::Other,
    };
    let id = match target.get_mut(parent) {
        Some(mut node) => node.append(kind).id(),
        None => return Ok(()),
    };
    for child in source.children() {
        copy_subtree(child, target, id, depth + 1)?;
    }
    Ok(())
}
