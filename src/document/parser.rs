//! XML parsing into the document model
//!
//! Tokenizing is done by `quick-xml`. Source slices are cut by position so
//! that every node keeps the exact text it was parsed from: each markup event
//! ends at the reader's buffer position, and the character data in between is
//! whatever precedes the next `<`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use super::{Document, Element, Node, Text};

const BOM: char = '\u{feff}';

/// Errors raised for malformed XML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The tokenizer rejected the input
    #[error("invalid XML at byte {position}: {message}")]
    Syntax { position: usize, message: String },

    /// An end tag did not match the open element
    #[error("unexpected </{found}> at byte {position}, expected </{expected}>")]
    MismatchedTag {
        expected: String,
        found: String,
        position: usize,
    },

    /// An end tag appeared with no open element
    #[error("unexpected </{found}> at byte {position}")]
    UnexpectedEndTag { found: String, position: usize },

    /// Input ended while elements were still open
    #[error("unclosed element <{name}>")]
    Unclosed { name: String },

    /// The document has no element at all
    #[error("document has no root element")]
    NoRootElement,
}

/// Parse XML text into a [`Document`].
pub fn parse(source: &str) -> Result<Document, DocumentError> {
    let (bom, content) = match source.strip_prefix(BOM) {
        Some(rest) => (true, rest),
        None => (false, source),
    };

    let mut reader = Reader::from_str(content);
    reader.trim_text(false);

    let mut top_level: Vec<Node> = Vec::new();
    let mut open: Vec<Element> = Vec::new();
    let mut consumed = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| DocumentError::Syntax {
            position: reader.buffer_position(),
            message: e.to_string(),
        })?;

        // Character data is recovered from the gaps between markup below.
        if matches!(event, Event::Text(_)) {
            continue;
        }

        let end = match event {
            Event::Eof => content.len(),
            _ => reader.buffer_position(),
        };
        let markup_start = match event {
            Event::Eof => end,
            _ => content[consumed..end]
                .find('<')
                .map_or(consumed, |offset| consumed + offset),
        };

        if markup_start > consumed {
            let raw = &content[consumed..markup_start];
            let text = decode_text(raw, consumed)?;
            push_node(&mut open, &mut top_level, Node::Text(text));
        }

        let raw = &content[markup_start..end];
        consumed = end;

        match event {
            Event::Start(start) => {
                let mut element = element_from(&start, markup_start)?;
                element.self_closing = false;
                element.raw_start = Some(raw.to_string());
                open.push(element);
            }
            Event::Empty(start) => {
                let mut element = element_from(&start, markup_start)?;
                element.raw_start = Some(raw.to_string());
                push_node(&mut open, &mut top_level, Node::Element(element));
            }
            Event::End(end_tag) => {
                let found = utf8(end_tag.name().as_ref(), markup_start)?;
                let mut element = open.pop().ok_or_else(|| DocumentError::UnexpectedEndTag {
                    found: found.clone(),
                    position: markup_start,
                })?;
                if element.name() != found {
                    return Err(DocumentError::MismatchedTag {
                        expected: element.name().to_string(),
                        found,
                        position: markup_start,
                    });
                }
                element.raw_end = Some(raw.to_string());
                push_node(&mut open, &mut top_level, Node::Element(element));
            }
            Event::Comment(_) => {
                let body = raw
                    .strip_prefix("<!--")
                    .and_then(|rest| rest.strip_suffix("-->"))
                    .unwrap_or(raw);
                push_node(&mut open, &mut top_level, Node::Comment(body.to_string()));
            }
            Event::Eof => break,
            _ => push_node(&mut open, &mut top_level, Node::Raw(raw.to_string())),
        }
    }

    if let Some(element) = open.pop() {
        return Err(DocumentError::Unclosed {
            name: element.name().to_string(),
        });
    }
    if !top_level.iter().any(Node::is_element) {
        return Err(DocumentError::NoRootElement);
    }

    Ok(Document {
        bom,
        children: top_level,
    })
}

fn push_node(open: &mut [Element], top_level: &mut Vec<Node>, node: Node) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top_level.push(node),
    }
}

fn element_from(start: &BytesStart<'_>, position: usize) -> Result<Element, DocumentError> {
    let mut element = Element::new(utf8(start.name().as_ref(), position)?);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| DocumentError::Syntax {
            position,
            message: e.to_string(),
        })?;
        let key = utf8(attribute.key.as_ref(), position)?;
        let value = attribute
            .unescape_value()
            .map_err(|e| DocumentError::Syntax {
                position,
                message: e.to_string(),
            })?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn decode_text(raw: &str, position: usize) -> Result<Text, DocumentError> {
    let value = quick_xml::escape::unescape(raw).map_err(|e| DocumentError::Syntax {
        position,
        message: e.to_string(),
    })?;
    Ok(Text::parsed(value.into_owned(), raw.to_string()))
}

fn utf8(bytes: &[u8], position: usize) -> Result<String, DocumentError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| DocumentError::Syntax {
            position,
            message: e.to_string(),
        })
}
