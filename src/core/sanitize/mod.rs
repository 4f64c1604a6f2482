//! Allow-list HTML sanitizer.
//!
//! [`sanitize`] is a pure function: the input is parsed into a detached
//! tree by `scraper` (nothing executes, nothing is fetched), a filtered copy
//! of the tree is built, and the copy is serialized. Disallowed elements are replaced by
//! their text content; allowed elements keep only allowed, non-dangerous
//! attributes. Sanitizing already-sanitized output changes nothing.

mod policy;
mod tree;

pub use policy::{ALLOWED_TAGS, UNIVERSAL_ATTRIBUTES, is_allowed_attribute, is_allowed_tag};
pub use tree::{Attribute, Element, Node, parse_fragment, serialize};

/// Sanitize an HTML fragment against the allow-list.
pub fn sanitize(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    serialize(&sanitize_nodes(&parse_fragment(html)))
}

/// Elements whose non-whitespace text the parser moves out of place.
const TABLE_SECTIONS: &[&str] = &["table", "thead", "tbody", "tr"];

/// Build the filtered copy of a parsed fragment.
pub fn sanitize_nodes(nodes: &[Node]) -> Vec<Node> {
    filter_children(None, nodes)
}

fn filter_children(parent: Option<&str>, nodes: &[Node]) -> Vec<Node> {
    let in_table_section = parent.is_some_and(|name| TABLE_SECTIONS.contains(&name));
    nodes
        .iter()
        .map(sanitize_node)
        .filter(|node| match node {
            Node::Text(text) if text.is_empty() => false,
            // Flattened text here would be re-parented on the next parse.
            Node::Text(text) if in_table_section => text.trim().is_empty(),
            _ => true,
        })
        .collect()
}

fn sanitize_node(node: &Node) -> Node {
    match node {
        Node::Text(text) => Node::Text(text.clone()),
        Node::Element(element) if !is_allowed_tag(&element.name) => {
            Node::Text(node.text_content())
        }
        Node::Element(element) => Node::Element(Element {
            name: element.name.clone(),
            attrs: element
                .attrs
                .iter()
                .filter(|attr| is_allowed_attribute(&element.name, &attr.name, &attr.value))
                .cloned()
                .collect(),
            children: filter_children(Some(&element.name), &element.children),
        }),
    }
}
