//! Markup dump of an (annotated) document.
//!
//! Turning the annotated tree into markup is the downstream renderer's job;
//! this is the minimal HTML-shaped serialization used for inspection and
//! tests. Only the `attributes` branch and the `style`, `src` and `href`
//! properties become attributes, in that order. Map-valued attributes and
//! extension properties have no markup form and are left out.

use indextree::NodeId;

use crate::dom::{Document, ElementData, NodeKind};
use crate::props::{PropValue, Properties};

/// HTML5 void elements - these never have end tags.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

impl Document {
    /// Serialize the whole tree, root included.
    pub fn to_html(&self) -> String {
        self.node_to_html(self.root)
    }

    /// Serialize the subtree rooted at `id`. Dead handles serialize to "".
    pub fn node_to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, id);
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId) {
        let Some(data) = self.get(id) else {
            return;
        };
        match &data.kind {
            NodeKind::Element(elem) => self.write_element(out, id, elem),
            NodeKind::Text(text) => write_text_escaped(out, text),
            NodeKind::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }

    fn write_element(&self, out: &mut String, id: NodeId, elem: &ElementData) {
        let tag = elem.tag.as_str();
        out.push('<');
        out.push_str(tag);
        write_props(out, &elem.props);
        out.push('>');

        if is_void_element(tag) {
            return;
        }

        for child in id.children(&self.arena) {
            self.write_node(out, child);
        }

        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

fn write_props(out: &mut String, props: &Properties) {
    let attrs = &props.attributes;
    if let Some(class) = &attrs.class {
        write_attr(out, "class", class);
    }
    if let Some(value) = &attrs.value {
        write_attr(out, "value", value);
    }
    for (name, value) in &attrs.extra {
        if let PropValue::Scalar(value) = value {
            write_attr(out, name, value);
        }
    }

    match &props.style {
        Some(PropValue::Scalar(style)) => write_attr(out, "style", style),
        Some(PropValue::Map(decls)) => {
            let mut style = String::new();
            for (name, value) in decls {
                if let PropValue::Scalar(value) = value {
                    if !style.is_empty() {
                        style.push(' ');
                    }
                    style.push_str(name);
                    style.push_str(": ");
                    style.push_str(value);
                    style.push(';');
                }
            }
            write_attr(out, "style", &style);
        }
        None => {}
    }
    if let Some(src) = &props.src {
        write_attr(out, "src", src);
    }
    if let Some(href) = &props.href {
        write_attr(out, "href", href);
    }
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

fn write_text_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_to_html_escaping() {
        let mut doc = Document::new("div");
        doc.append_text(doc.root, "<script> & \"quotes\"");
        assert_eq!(
            doc.to_html(),
            "<div>&lt;script&gt; &amp; \"quotes\"</div>"
        );
    }

    #[test]
    fn test_to_html_attribute_order() {
        let mut doc = Document::new("body");
        let a = doc.new_element_with(
            "a",
            Properties::new()
                .with_href("/x?a=1&b=2")
                .with_style(PropValue::map([("color", "red"), ("margin", "0")]))
                .with_attribute("id", "link")
                .with_class("nav")
                .with_extra("onclick", "ignored"),
        );
        doc.append(doc.root, a);
        doc.append_text(a, "go");

        assert_eq!(
            doc.to_html(),
            "<body><a class=\"nav\" id=\"link\" style=\"color: red; margin: 0;\" \
             href=\"/x?a=1&amp;b=2\">go</a></body>"
        );
    }

    #[test]
    fn test_to_html_void_and_comment() {
        let mut doc = Document::new("p");
        let img = doc.new_element_with("img", Properties::new().with_src("cat.png"));
        doc.append(doc.root, img);
        let comment = doc.new_comment(" note ");
        doc.append(doc.root, comment);

        assert_eq!(doc.to_html(), "<p><img src=\"cat.png\"><!-- note --></p>");
    }
}
