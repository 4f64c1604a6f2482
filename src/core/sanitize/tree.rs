//! Owned document tree for HTML fragments.
//!
//! Parsing is done by `scraper` (html5ever), so entities, raw-text elements
//! and misnested tags follow the HTML parsing algorithm a browser uses. The
//! result is copied into a small owned tree the sanitizer can filter.

use scraper::{ElementRef, Html, Node as DomNode};

use crate::utils::escape_text;

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Element {
    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.name.as_str())
    }
}

impl Node {
    /// Concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Parse an HTML fragment (in a `<body>` context) into a detached tree.
///
/// Comments, doctypes and processing instructions are dropped. Adjacent
/// text is merged and empty text is skipped.
pub fn parse_fragment(html: &str) -> Vec<Node> {
    let fragment = Html::parse_fragment(html);
    convert_children(fragment.root_element())
}

fn convert_children(parent: ElementRef<'_>) -> Vec<Node> {
    let mut nodes: Vec<Node> = Vec::new();
    for child in parent.children() {
        match child.value() {
            DomNode::Text(text) => {
                let text: &str = text;
                if text.is_empty() {
                    continue;
                }
                match nodes.last_mut() {
                    Some(Node::Text(existing)) => existing.push_str(text),
                    _ => nodes.push(Node::Text(text.to_string())),
                }
            }
            DomNode::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    nodes.push(Node::Element(convert_element(element)));
                }
            }
            _ => {}
        }
    }
    nodes
}

fn convert_element(element: ElementRef<'_>) -> Element {
    let value = element.value();
    Element {
        name: value.name().to_string(),
        attrs: value
            .attrs()
            .map(|(name, value)| Attribute {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect(),
        children: convert_children(element),
    }
}

/// Serialize nodes back to HTML.
///
/// Text is escaped, attribute values are double-quoted and escaped, void
/// elements get no end tag and every other element does.
pub fn serialize(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Element(element) => {
            out.push('<');
            out.push_str(&element.name);
            for attr in &element.attrs {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(&attr.value));
                out.push('"');
            }
            out.push('>');

            if element.is_void() {
                return;
            }

            // The parser drops one newline right after `<pre>`.
            if element.name == "pre"
                && matches!(element.children.first(), Some(Node::Text(text)) if text.starts_with('\n'))
            {
                out.push('\n');
            }

            for child in &element.children {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(&element.name);
            out.push('>');
        }
    }
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    #[test]
    fn test_nested_elements() {
        let nodes = parse_fragment("<p>a <b>b</b> c</p>");
        assert_eq!(nodes.len(), 1);
        let Node::Element(p) = &nodes[0] else {
            panic!("Expected element");
        };
        assert_eq!(p.name, "p");
        assert_eq!(p.children.len(), 3);
        assert_eq!(nodes[0].text_content(), "a b c");
    }

    #[test]
    fn test_void_elements_have_no_children() {
        let nodes = parse_fragment("a<br>b<img src=x>c");
        assert_eq!(nodes.len(), 5);
        assert_eq!(serialize(&nodes), "a<br>b<img src=\"x\">c");
    }

    #[test]
    fn test_unclosed_elements_closed_at_end() {
        assert_eq!(serialize(&parse_fragment("<b><i>x")), "<b><i>x</i></b>");
    }

    #[test]
    fn test_stray_end_tag_ignored() {
        assert_eq!(parse_fragment("a</div>b"), vec![text("ab")]);
    }

    #[test]
    fn test_named_entities_decoded() {
        assert_eq!(
            parse_fragment("caf&eacute; &euro;5 &mdash; &amp;"),
            vec![text("café €5 — &")]
        );
    }

    #[test]
    fn test_comments_dropped() {
        assert_eq!(parse_fragment("a<!-- x -->b"), vec![text("ab")]);
    }

    #[test]
    fn test_text_escaped_on_output() {
        assert_eq!(serialize(&parse_fragment("1 < 2 &amp; 3")), "1 &lt; 2 &amp; 3");
    }

    #[test]
    fn test_attribute_escaped_on_output() {
        assert_eq!(
            serialize(&parse_fragment(r#"<a title='say "hi" & <go>'>x</a>"#)),
            "<a title=\"say &quot;hi&quot; &amp; &lt;go&gt;\">x</a>"
        );
    }

    #[test]
    fn test_attribute_order_kept() {
        assert_eq!(
            serialize(&parse_fragment("<a href=\"u\" target=\"_blank\" rel=\"r\">x</a>")),
            "<a href=\"u\" target=\"_blank\" rel=\"r\">x</a>"
        );
    }

    #[test]
    fn test_pre_leading_newline_survives() {
        let html = "<pre>\n\nx</pre>";
        let once = serialize(&parse_fragment(html));
        assert_eq!(serialize(&parse_fragment(&once)), once);
    }

    #[test]
    fn test_round_trip_is_stable() {
        let inputs = [
            "<table><tr><td>1</td></tr></table>",
            "<b>x</b><i>y",
            "<b><i>x</b>y",
            "a &lt;b&gt; c",
            "<div class=\"a\" style='color:red'>t</div>",
        ];
        for input in inputs {
            let once = serialize(&parse_fragment(input));
            assert_eq!(serialize(&parse_fragment(&once)), once, "input: {input:?}");
        }
    }
}
