//! Property tests for the manifest document model.

use proptest::prelude::*;

use projsync::document::{parse, serialize};

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z][A-Za-z]{0,10}").unwrap()
}

fn whitespace() -> impl Strategy<Value = String> {
    proptest::string::string_regex("(\r?\n)?[ \t]{0,6}").unwrap()
}

/// Attributes with distinct names, some single-quoted, some on their own line.
fn attributes() -> impl Strategy<Value = String> {
    let value = proptest::string::string_regex("[A-Za-z0-9 .$()\\\\]{0,16}").unwrap();
    proptest::collection::vec((name(), value, any::<bool>(), whitespace()), 0..3).prop_map(
        |attributes| {
            attributes
                .into_iter()
                .enumerate()
                .map(|(i, (key, value, single, gap))| {
                    let quote = if single { '\'' } else { '"' };
                    format!("{gap} {key}{i}={quote}{value}{quote}")
                })
                .collect::<String>()
        },
    )
}

/// An item element, either self-closing or with text metadata.
fn item() -> impl Strategy<Value = String> {
    let text = proptest::string::string_regex("[A-Za-z0-9 .,]{0,12}(&amp;[a-z]{0,3})?").unwrap();
    (
        name(),
        attributes(),
        prop::option::of((name(), text)),
        whitespace(),
    )
        .prop_map(|(tag, attributes, metadata, ws)| match metadata {
            None => format!("<{tag}{}{ws}/>", attributes),
            Some((child, text)) => format!(
                "<{tag}{}>{ws}<{child}>{text}</{child}>{ws}</{tag}>",
                attributes
            ),
        })
}

fn group() -> impl Strategy<Value = String> {
    let comment = proptest::string::string_regex("[A-Za-z0-9 .]{0,20}").unwrap();
    (
        proptest::collection::vec((whitespace(), item()), 0..5),
        prop::option::of(comment),
        whitespace(),
    )
        .prop_map(|(items, comment, closing)| {
            let mut out = String::from("<ItemGroup>");
            if let Some(comment) = comment {
                out.push_str(&format!("<!--{comment}-->"));
            }
            for (ws, item) in items {
                out.push_str(&ws);
                out.push_str(&item);
            }
            out.push_str(&closing);
            out.push_str("</ItemGroup>");
            out
        })
}

fn manifest() -> impl Strategy<Value = String> {
    (
        any::<bool>(),
        any::<bool>(),
        attributes(),
        proptest::collection::vec((whitespace(), group()), 0..4),
        whitespace(),
    )
        .prop_map(|(bom, declaration, attributes, groups, tail)| {
            let mut out = String::new();
            if bom {
                out.push('\u{feff}');
            }
            if declaration {
                out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n");
            }
            out.push_str(&format!("<Project{}>", attributes));
            for (ws, group) in groups {
                out.push_str(&ws);
                out.push_str(&group);
            }
            out.push_str(&tail);
            out.push_str("</Project>");
            out.push_str(&tail);
            out
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A manifest that is parsed and not edited serializes byte-for-byte.
    #[test]
    fn property_untouched_manifest_is_byte_identical(source in manifest()) {
        let document = parse(&source).unwrap();
        prop_assert_eq!(serialize(&document), source);
    }

    /// PROPERTY: Parsing never panics, whatever the input.
    #[test]
    fn property_parse_never_panics(source in "(?s).{0,256}") {
        let _ = parse(&source);
    }
}
