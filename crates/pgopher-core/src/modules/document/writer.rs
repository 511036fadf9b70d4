use super::model::Element;
use std::borrow::Cow;

pub const XML_DECLARATION: &str = "<?xml version=\"1.0\"?>";
const INDENT: &str = "  ";

/// Declaration line followed by the pretty-printed tree.
pub fn write_document(root: &Element) -> String {
    let mut out = String::from(XML_DECLARATION);
    out.push('\n');
    write_element(&mut out, root, 0);
    out
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    let tag = element.tag();
    push_indent(out, depth);
    out.push('<');
    out.push_str(&tag);
    for (name, value) in element.attributes() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }

    if element.children().is_empty() {
        out.push_str("/>\n");
        return;
    }

    out.push_str(">\n");
    for child in element.children() {
        write_element(out, child, depth + 1);
    }
    push_indent(out, depth);
    out.push_str("</");
    out.push_str(&tag);
    out.push_str(">\n");
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Whether `name` is a well-formed XML attribute name.
pub fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == ':')
        && chars.all(|ch| ch.is_alphanumeric() || matches!(ch, '_' | ':' | '-' | '.'))
}

pub(crate) fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\n', '\r', '\t']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::{escape_attribute, is_attribute_name, write_document};
    use crate::modules::document::model::{Element, NodeKind};

    #[test]
    fn empty_elements_self_close_and_children_indent() {
        let tree = Element::new(NodeKind::Mixture)
            .with_attribute("Units", "MHz")
            .with_child(Element::parameter("Temperature", "300.0"));

        assert_eq!(
            write_document(&tree),
            "<?xml version=\"1.0\"?>\n<Mixture Units=\"MHz\">\n  <Parameter Name=\"Temperature\" Value=\"300.0\"/>\n</Mixture>\n"
        );
    }

    #[test]
    fn attribute_values_are_escaped() {
        assert_eq!(escape_attribute("v=0"), "v=0");
        assert_eq!(
            escape_attribute("a<b & \"c\""),
            "a&lt;b &amp; &quot;c&quot;"
        );
        assert_eq!(escape_attribute("two\nlines"), "two&#10;lines");
    }

    #[test]
    fn attribute_names_follow_xml_name_rules() {
        for valid in ["Jmax", "Name", "_hidden", "ns:attr", "Max-J.2"] {
            assert!(is_attribute_name(valid), "{valid}");
        }
        for invalid in ["", "max J", "2J", "-lead", "a\"b", "x=y"] {
            assert!(!is_attribute_name(invalid), "{invalid}");
        }
    }
}
