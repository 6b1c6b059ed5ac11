//! Document serialization
//!
//! Nodes that still carry their source text are written verbatim. Regenerated
//! start tags use double quotes and the ` />` spelling for empty elements,
//! which is how MSBuild tooling writes them.

use quick_xml::escape::escape;

use super::{Document, Element, Node, Text};

/// Serialize a [`Document`] back to XML text.
pub fn serialize(document: &Document) -> String {
    let mut out = String::new();
    if document.bom {
        out.push('\u{feff}');
    }
    for node in &document.children {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(element) => write_element(out, element),
        Node::Text(text) => write_text(out, text),
        Node::Comment(body) => {
            out.push_str("<!--");
            out.push_str(body);
            out.push_str("-->");
        }
        Node::Raw(raw) => out.push_str(raw),
    }
}

fn write_text(out: &mut String, text: &Text) {
    match &text.raw {
        Some(raw) => out.push_str(raw),
        None => out.push_str(&escape(text.value())),
    }
}

fn write_element(out: &mut String, element: &Element) {
    match &element.raw_start {
        Some(raw) => out.push_str(raw),
        None => write_start_tag(out, element),
    }

    if element.self_closing {
        return;
    }

    for child in &element.children {
        write_node(out, child);
    }

    match &element.raw_end {
        Some(raw) => out.push_str(raw),
        None => {
            out.push_str("</");
            out.push_str(element.name());
            out.push('>');
        }
    }
}

fn write_start_tag(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.name());
    for (key, value) in element.attributes() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }
    if element.self_closing {
        out.push_str(" />");
    } else {
        out.push('>');
    }
}
