//! In-memory XML document model
//!
//! A small tree of elements, text, comments and raw markup that remembers the
//! exact source text of every node it parsed. Nodes that are never touched
//! serialize back byte-for-byte; nodes that are mutated drop their source text
//! and are regenerated by the writer.
//!
//! Every element owns a materialized `children` list, even when it was parsed
//! from a self-closing tag, so callers never have to check for a missing one.

mod parser;
mod writer;

pub use parser::{parse, DocumentError};
pub use writer::serialize;

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Whether the source started with a UTF-8 byte order mark.
    pub(crate) bom: bool,
    /// Top-level nodes: declaration, comments, whitespace and the root element.
    pub children: Vec<Node>,
}

impl Document {
    /// The first element at the top level (the project element of a manifest).
    pub fn root(&self) -> Option<&Element> {
        self.children.iter().find_map(Node::as_element)
    }

    /// Mutable access to the root element.
    pub fn root_mut(&mut self) -> Option<&mut Element> {
        self.children.iter_mut().find_map(Node::as_element_mut)
    }
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(Text),
    /// Comment body, without the `<!--` and `-->` delimiters.
    Comment(String),
    /// Markup kept verbatim: XML declaration, processing instructions,
    /// doctype and CDATA sections.
    Raw(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// True for text nodes made only of whitespace (indentation).
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Node::Text(text) if text.is_whitespace())
    }
}

/// Character data, kept both decoded and as it appeared in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    value: String,
    pub(crate) raw: Option<String>,
}

impl Text {
    /// Create a text node from an unescaped value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            raw: None,
        }
    }

    pub(crate) fn parsed(value: String, raw: String) -> Self {
        Self {
            value,
            raw: Some(raw),
        }
    }

    /// The decoded text.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_whitespace(&self) -> bool {
        self.value.chars().all(char::is_whitespace)
    }
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
    pub(crate) self_closing: bool,
    /// Source text of the start tag; cleared when the tag must be regenerated.
    pub(crate) raw_start: Option<String>,
    /// Source text of the end tag.
    pub(crate) raw_end: Option<String>,
}

impl Element {
    /// Create a new, empty, self-closing element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: true,
            raw_start: None,
            raw_end: None,
        }
    }

    /// Builder-style attribute setter for freshly created elements.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, keeping its position if it already exists.
    ///
    /// Setting an attribute to the value it already has is a no-op and keeps
    /// the original start tag text.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) if *existing == value => return,
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
        self.raw_start = None;
    }

    /// Element children, skipping text and comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    pub fn child_element(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    pub fn child_element_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements_mut().find(|element| element.name == name)
    }

    pub fn has_element_children(&self) -> bool {
        self.children.iter().any(Node::is_element)
    }

    /// Concatenated text content of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.value()),
                _ => None,
            })
            .collect()
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.text() == value && self.children.iter().all(|n| matches!(n, Node::Text(_))) {
            return;
        }
        self.children = vec![Node::Text(Text::new(value))];
        self.open();
    }

    /// Appends `child` after the last element child, copying the indentation
    /// that precedes that sibling.
    ///
    /// `indent` is the indentation of `self` itself; it is only used when the
    /// element has no element children yet.
    pub fn append_element(&mut self, child: Element, indent: &str) {
        match self.children.iter().rposition(Node::is_element) {
            Some(last) => {
                let spacing = self
                    .whitespace_before(last)
                    .unwrap_or_else(|| format!("\n{indent}  "));
                self.children.insert(last + 1, Node::Text(Text::new(spacing)));
                self.children.insert(last + 2, Node::Element(child));
            }
            None => {
                if self.children.iter().all(Node::is_whitespace) {
                    self.children = vec![
                        Node::Text(Text::new(format!("\n{indent}  "))),
                        Node::Element(child),
                        Node::Text(Text::new(format!("\n{indent}"))),
                    ];
                } else {
                    self.children.push(Node::Element(child));
                }
                self.open();
            }
        }
    }

    /// Insert `child` right after the element child at `index` (an index into
    /// `children`), reusing the whitespace that precedes that sibling.
    pub fn insert_element_after(&mut self, index: usize, child: Element) {
        let spacing = self
            .whitespace_before(index)
            .unwrap_or_else(|| "\n".to_string());
        let at = (index + 1).min(self.children.len());
        self.children.insert(at, Node::Text(Text::new(spacing)));
        self.children.insert(at + 1, Node::Element(child));
    }

    /// The indentation (whitespace after the last line break) preceding the
    /// child at `index`.
    pub fn indentation_of(&self, index: usize) -> String {
        self.whitespace_before(index)
            .map(|ws| match ws.rfind('\n') {
                Some(pos) => ws[pos + 1..].to_string(),
                None => ws,
            })
            .unwrap_or_default()
    }

    /// Keep only the element children for which `keep` returns true.
    ///
    /// Whitespace directly preceding a removed element is removed with it.
    /// Returns the number of removed elements.
    pub fn retain_elements<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&mut Element) -> bool,
    {
        let mut removed = 0;
        let mut kept: Vec<Node> = Vec::with_capacity(self.children.len());
        for mut node in std::mem::take(&mut self.children) {
            if let Node::Element(element) = &mut node {
                if !keep(element) {
                    removed += 1;
                    if kept.last().is_some_and(Node::is_whitespace) {
                        kept.pop();
                    }
                    continue;
                }
            }
            kept.push(node);
        }
        self.children = kept;
        removed
    }

    /// Turn an element whose children are all whitespace back into a
    /// self-closing tag.
    pub fn collapse_if_empty(&mut self) {
        if self.self_closing || !self.children.iter().all(Node::is_whitespace) {
            return;
        }
        self.children.clear();
        self.self_closing = true;
        self.raw_start = None;
        self.raw_end = None;
    }

    fn whitespace_before(&self, index: usize) -> Option<String> {
        let previous = index.checked_sub(1).and_then(|i| self.children.get(i))?;
        match previous {
            Node::Text(text) if text.is_whitespace() => Some(text.value().to_string()),
            _ => None,
        }
    }

    /// A self-closing element that gains content needs a start and end tag.
    fn open(&mut self) {
        if self.self_closing {
            self.self_closing = false;
            self.raw_start = None;
            self.raw_end = None;
        }
    }
}
