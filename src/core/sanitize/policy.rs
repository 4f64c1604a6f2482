//! Allow-list policy: which tags and attributes survive sanitization.

/// Tags rendered as markup. Everything else is flattened to its text.
pub const ALLOWED_TAGS: &[&str] = &[
    "b", "i", "u", "strong", "em", "del", "br", "p", "div", "span", "ul", "ol", "li", "a", "h1",
    "h2", "h3", "h4", "h5", "h6", "table", "thead", "tbody", "tr", "td", "th", "blockquote",
    "code", "pre", "hr", "img",
];

/// Attributes allowed on specific tags.
const TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "target", "rel"]),
    ("img", &["src", "alt", "style", "width", "height"]),
];

/// Attributes allowed on every allowed tag.
pub const UNIVERSAL_ATTRIBUTES: &[&str] = &["class", "style", "colspan", "rowspan"];

/// URI schemes that execute script when followed.
const SCRIPT_SCHEMES: &[&str] = &["javascript:", "vbscript:"];

pub fn is_allowed_tag(tag: &str) -> bool {
    ALLOWED_TAGS.contains(&tag)
}

/// Whether `name="value"` may stay on an allowed `tag`.
///
/// Event handlers and script URIs are rejected on every tag. `data:` URIs
/// are only accepted for images (`data:image/...`).
pub fn is_allowed_attribute(tag: &str, name: &str, value: &str) -> bool {
    if name.starts_with("on") {
        return false;
    }

    let normalized = normalize_uri(value);
    if SCRIPT_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
    {
        return false;
    }
    if matches!(name, "src" | "href")
        && normalized.starts_with("data:")
        && !normalized.starts_with("data:image/")
    {
        return false;
    }

    UNIVERSAL_ATTRIBUTES.contains(&name)
        || TAG_ATTRIBUTES
            .iter()
            .any(|(allowed_tag, attrs)| *allowed_tag == tag && attrs.contains(&name))
}

/// Lowercase a URI and drop the whitespace and control characters browsers
/// ignore inside a scheme (`java\tscript:`).
fn normalize_uri(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_tags() {
        assert!(is_allowed_tag("strong"));
        assert!(is_allowed_tag("h6"));
        assert!(!is_allowed_tag("script"));
        assert!(!is_allowed_tag("iframe"));
        assert!(!is_allowed_tag("svg"));
    }

    #[test]
    fn test_tag_specific_attributes() {
        assert!(is_allowed_attribute("a", "href", "https://x.test"));
        assert!(is_allowed_attribute("a", "rel", "noopener"));
        assert!(!is_allowed_attribute("span", "href", "https://x.test"));
        assert!(is_allowed_attribute("img", "width", "10"));
        assert!(!is_allowed_attribute("a", "width", "10"));
    }

    #[test]
    fn test_universal_attributes() {
        for tag in ["td", "span", "div"] {
            assert!(is_allowed_attribute(tag, "class", "x"));
            assert!(is_allowed_attribute(tag, "colspan", "2"));
        }
        assert!(!is_allowed_attribute("td", "id", "x"));
    }

    #[test]
    fn test_event_handlers_rejected() {
        assert!(!is_allowed_attribute("img", "onerror", "alert(1)"));
        assert!(!is_allowed_attribute("a", "onclick", ""));
    }

    #[test]
    fn test_script_schemes_rejected() {
        assert!(!is_allowed_attribute("a", "href", "javascript:alert(1)"));
        assert!(!is_allowed_attribute("a", "href", "  JavaScript:alert(1)"));
        assert!(!is_allowed_attribute("a", "href", "java\tscript:alert(1)"));
        assert!(!is_allowed_attribute("img", "src", "vbscript:x"));
        assert!(!is_allowed_attribute("div", "class", "javascript:x"));
    }

    #[test]
    fn test_data_uris() {
        assert!(is_allowed_attribute("img", "src", "data:image/png;base64,AAAA"));
        assert!(!is_allowed_attribute("img", "src", "data:text/html,<b>x</b>"));
        assert!(!is_allowed_attribute("a", "href", "DATA:text/html,x"));
    }
}
