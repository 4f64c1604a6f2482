//! Inline rules and line-break handling for text-bearing blocks.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::utils::escape_html;

// ============================================================================
// Patterns (compiled once at first use)
// ============================================================================

static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]\n]*)\]\(([^()\n\t ]+)\)")
        .expect("BUG: hardcoded image regex is statically valid")
});

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]\n]+)\]\(([^()\n\t ]+)\)")
        .expect("BUG: hardcoded link regex is statically valid")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</?[A-Za-z][^<>]*>").expect("BUG: hardcoded tag regex is statically valid")
});

/// Emphasis rules in application order, each with the element it produces.
static EMPHASIS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\*\*([^\n]+?)\*\*", "strong"),
        (r"__([^\n]+?)__", "strong"),
        (r"\*([^*\n]+?)\*", "em"),
        (r"_([^_\n]+?)_", "em"),
        (r"~~([^\n]+?)~~", "del"),
    ]
    .into_iter()
    .map(|(pattern, tag)| {
        let re = Regex::new(pattern).expect("BUG: hardcoded emphasis regex is statically valid");
        (re, tag)
    })
    .collect()
});

// ============================================================================
// Inline Rendering
// ============================================================================

/// Apply image, link and emphasis rules to one line of text.
pub fn render_inline(text: &str) -> String {
    let html = IMAGE.replace_all(text, |caps: &Captures| {
        format!(
            "<img src=\"{}\" alt=\"{}\" style=\"max-width:100%\">",
            escape_html(&caps[2]),
            escape_html(&caps[1])
        )
    });

    let mut html = LINK
        .replace_all(&html, |caps: &Captures| {
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                escape_html(&caps[2]),
                &caps[1]
            )
        })
        .into_owned();

    for (re, tag) in EMPHASIS.iter() {
        let replacement = format!("<{tag}>$1</{tag}>");
        html = map_text_segments(&html, |segment| {
            re.replace_all(segment, replacement.as_str()).into_owned()
        });
    }

    html
}

/// Apply `f` to the text between tags, leaving the tags themselves alone.
fn map_text_segments(html: &str, mut f: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;

    for tag in TAG.find_iter(html) {
        out.push_str(&f(&html[last..tag.start()]));
        out.push_str(tag.as_str());
        last = tag.end();
    }

    out.push_str(&f(&html[last..]));
    out
}

// ============================================================================
// Line Breaks
// ============================================================================

/// Whether the newline between two rendered lines becomes `<br>\n`: both
/// sides are non-empty and neither is a tag boundary.
pub fn is_soft_break(line: &str, next: &str) -> bool {
    !line.is_empty() && !next.is_empty() && !line.ends_with('>') && !next.starts_with('<')
}

/// Render the lines of one text block and join them.
///
/// A line ending in two spaces is a hard break. Any other newline whose
/// neighbours are not a tag boundary (`>` before, `<` after) is upgraded to
/// a visible `<br>` as well; the newline itself is kept.
pub fn render_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let rendered: Vec<(String, bool)> = lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            let hard = line.ends_with("  ");
            let text = if hard { line.trim_end_matches(' ') } else { line };
            (render_inline(text), hard)
        })
        .collect();

    let mut out = String::new();
    for (i, (line, hard)) in rendered.iter().enumerate() {
        out.push_str(line);

        let Some((next, _)) = rendered.get(i + 1) else {
            break;
        };

        if *hard || is_soft_break(line, next) {
            out.push_str("<br>");
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(render_inline("**x**"), "<strong>x</strong>");
        assert_eq!(render_inline("__x__"), "<strong>x</strong>");
        assert_eq!(render_inline("*x*"), "<em>x</em>");
        assert_eq!(render_inline("_x_"), "<em>x</em>");
        assert_eq!(render_inline("~~x~~"), "<del>x</del>");
    }

    #[test]
    fn test_emphasis_is_non_greedy() {
        assert_eq!(
            render_inline("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn test_bold_then_italic() {
        assert_eq!(
            render_inline("**bold** and *it*"),
            "<strong>bold</strong> and <em>it</em>"
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render_inline("see [docs](https://example.com/a_b_c)"),
            "see <a href=\"https://example.com/a_b_c\" target=\"_blank\" \
             rel=\"noopener noreferrer\">docs</a>"
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            render_inline("![cat](https://x.test/cat.png)"),
            "<img src=\"https://x.test/cat.png\" alt=\"cat\" style=\"max-width:100%\">"
        );
    }

    #[test]
    fn test_url_quotes_are_escaped() {
        let html = render_inline("[x](https://e.test/\"onmouseover=\"y)");
        assert!(html.contains("href=\"https://e.test/&quot;onmouseover=&quot;y\""));
    }

    #[test]
    fn test_emphasis_does_not_touch_tags() {
        let html = render_inline("![a_b](https://x.test/a_b_c.png) _it_");
        assert!(html.contains("src=\"https://x.test/a_b_c.png\""));
        assert!(html.ends_with("<em>it</em>"));
    }

    #[test]
    fn test_unmatched_markers_are_literal() {
        assert_eq!(render_inline("2 * 3 = 6"), "2 * 3 = 6");
        assert_eq!(render_inline("[not a link]"), "[not a link]");
        assert_eq!(render_inline("**open"), "**open");
    }

    #[test]
    fn test_soft_breaks_upgraded() {
        assert_eq!(render_lines(&["one", "two"]), "one<br>\ntwo");
    }

    #[test]
    fn test_hard_break() {
        assert_eq!(render_lines(&["one  ", "two"]), "one<br>\ntwo");
    }

    #[test]
    fn test_no_break_at_tag_boundary() {
        assert_eq!(
            render_lines(&["**bold**", "next"]),
            "<strong>bold</strong>\nnext"
        );
        assert_eq!(render_lines(&["prev", "*it*"]), "prev\n<em>it</em>");
    }

    #[test]
    fn test_single_line_has_no_break() {
        assert_eq!(render_lines(&["only  "]), "only");
    }
}
