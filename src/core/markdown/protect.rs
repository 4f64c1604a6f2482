//! Protected code fragments.
//!
//! Fenced blocks and inline code spans are escaped and parked in a
//! [`ProtectedSpans`] table while the rest of the document is transformed.
//! The working text only carries a short token naming the fragment by kind
//! and integer handle. Tokens are delimited by private-use characters that
//! [`strip_sentinels`] removes from the input first, so user text can never
//! forge one.

use std::borrow::Cow;

use crate::utils::escape_text;

const TOKEN_OPEN: char = '\u{E000}';
const TOKEN_CLOSE: char = '\u{E001}';

/// Namespace of a protected fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    /// Fenced code block (`<pre><code>`)
    Block,
    /// Inline code span (`<code>`)
    Inline,
}

impl SpanKind {
    fn tag(self) -> char {
        match self {
            Self::Block => 'B',
            Self::Inline => 'I',
        }
    }

    fn from_tag(c: char) -> Option<Self> {
        match c {
            'B' => Some(Self::Block),
            'I' => Some(Self::Inline),
            _ => None,
        }
    }
}

/// Replace token delimiters that appear in untrusted input.
pub fn strip_sentinels(input: &str) -> Cow<'_, str> {
    if input.contains([TOKEN_OPEN, TOKEN_CLOSE]) {
        Cow::Owned(input.replace([TOKEN_OPEN, TOKEN_CLOSE], "\u{FFFD}"))
    } else {
        Cow::Borrowed(input)
    }
}

/// Ordered store of escaped code fragments, one list per namespace.
#[derive(Debug, Default)]
pub struct ProtectedSpans {
    blocks: Vec<String>,
    inline: Vec<String>,
}

impl ProtectedSpans {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a fenced code block and return the token standing in for it.
    ///
    /// The body is HTML-escaped and stripped of trailing whitespace. A
    /// language tag becomes a `language-*` class on the `<code>` element.
    pub fn protect_block(&mut self, lang: Option<&str>, body: &str) -> String {
        let code = escape_text(body.trim_end());
        let html = match lang {
            Some(lang) => format!("<pre><code class=\"language-{lang}\">{code}</code></pre>"),
            None => format!("<pre><code>{code}</code></pre>"),
        };
        self.push(SpanKind::Block, html)
    }

    /// Park an inline code span and return its token.
    pub fn protect_inline(&mut self, code: &str) -> String {
        let html = format!("<code>{}</code>", escape_text(code));
        self.push(SpanKind::Inline, html)
    }

    /// Replace every single-backtick span on a line with a token.
    ///
    /// An empty pair of backticks is not a span, and an unmatched backtick
    /// stays literal.
    pub fn protect_code_spans(&mut self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut rest = line;

        while let Some(start) = rest.find('`') {
            let after = &rest[start + 1..];
            match after.find('`') {
                Some(0) => {
                    out.push_str(&rest[..=start]);
                    rest = after;
                }
                Some(end) => {
                    out.push_str(&rest[..start]);
                    let token = self.protect_inline(&after[..end]);
                    out.push_str(&token);
                    rest = &after[end + 1..];
                }
                None => break,
            }
        }

        out.push_str(rest);
        out
    }

    /// Number of parked fragments across both namespaces.
    pub fn len(&self) -> usize {
        self.blocks.len() + self.inline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, kind: SpanKind, html: String) -> String {
        let store = match kind {
            SpanKind::Block => &mut self.blocks,
            SpanKind::Inline => &mut self.inline,
        };
        let handle = store.len();
        store.push(html);
        format!("{TOKEN_OPEN}{}{handle}{TOKEN_CLOSE}", kind.tag())
    }

    fn lookup(&self, kind: SpanKind, handle: usize) -> Option<&str> {
        let store = match kind {
            SpanKind::Block => &self.blocks,
            SpanKind::Inline => &self.inline,
        };
        store.get(handle).map(String::as_str)
    }

    /// Consume the table, substituting every token in `html` with its
    /// fragment.
    ///
    /// Matching is by exact token. Delimiters that do not frame a known kind
    /// and handle are dropped and the text between them is kept.
    pub fn restore(self, html: &str) -> String {
        if self.is_empty() {
            return html.to_string();
        }

        let mut out = String::with_capacity(html.len());
        let mut rest = html;

        while let Some(start) = rest.find(TOKEN_OPEN) {
            out.push_str(&rest[..start]);
            let body = &rest[start + TOKEN_OPEN.len_utf8()..];

            let Some(end) = body.find(TOKEN_CLOSE) else {
                rest = body;
                continue;
            };

            let token = &body[..end];
            let mut chars = token.chars();
            let fragment = chars
                .next()
                .and_then(SpanKind::from_tag)
                .zip(chars.as_str().parse::<usize>().ok())
                .and_then(|(kind, handle)| self.lookup(kind, handle));

            match fragment {
                Some(fragment) => {
                    out.push_str(fragment);
                    rest = &body[end + TOKEN_CLOSE.len_utf8()..];
                }
                None => {
                    out.push_str(token);
                    rest = &body[end + TOKEN_CLOSE.len_utf8()..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_span_round_trip() {
        let mut spans = ProtectedSpans::new();
        let line = spans.protect_code_spans("run `a < b` now");
        assert!(!line.contains('`'));
        assert!(!line.contains("a < b"));
        assert_eq!(spans.restore(&line), "run <code>a &lt; b</code> now");
    }

    #[test]
    fn test_multiple_spans_keep_order() {
        let mut spans = ProtectedSpans::new();
        let line = spans.protect_code_spans("`one` and `two`");
        assert_eq!(
            spans.restore(&line),
            "<code>one</code> and <code>two</code>"
        );
    }

    #[test]
    fn test_unmatched_backtick_is_literal() {
        let mut spans = ProtectedSpans::new();
        assert_eq!(spans.protect_code_spans("a ` b"), "a ` b");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_empty_backticks_not_a_span() {
        let mut spans = ProtectedSpans::new();
        let line = spans.protect_code_spans("`` x `y`");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans.restore(&line), "`` x <code>y</code>");
    }

    #[test]
    fn test_block_with_language() {
        let mut spans = ProtectedSpans::new();
        let token = spans.protect_block(Some("rust"), "let x = 1 < 2;\n\n");
        assert_eq!(
            spans.restore(&token),
            "<pre><code class=\"language-rust\">let x = 1 &lt; 2;</code></pre>"
        );
    }

    #[test]
    fn test_block_and_inline_namespaces_do_not_collide() {
        let mut spans = ProtectedSpans::new();
        let block = spans.protect_block(None, "block");
        let inline = spans.protect_inline("inline");
        assert_ne!(block, inline);
        let html = format!("{block}|{inline}");
        assert_eq!(
            spans.restore(&html),
            "<pre><code>block</code></pre>|<code>inline</code>"
        );
    }

    #[test]
    fn test_handles_beyond_nine() {
        let mut spans = ProtectedSpans::new();
        let tokens: Vec<String> = (0..12)
            .map(|i| spans.protect_inline(&i.to_string()))
            .collect();
        let html = tokens.concat();
        let expected: String = (0..12).map(|i| format!("<code>{i}</code>")).collect();
        assert_eq!(spans.restore(&html), expected);
    }

    #[test]
    fn test_strip_sentinels() {
        let forged = format!("x{TOKEN_OPEN}I0{TOKEN_CLOSE}y");
        let cleaned = strip_sentinels(&forged);
        assert!(!cleaned.contains(TOKEN_OPEN));
        assert!(!cleaned.contains(TOKEN_CLOSE));
        assert!(matches!(strip_sentinels("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unknown_token_dropped() {
        let mut spans = ProtectedSpans::new();
        spans.protect_inline("x");
        let html = format!("a{TOKEN_OPEN}I7{TOKEN_CLOSE}b");
        assert_eq!(spans.restore(&html), "aI7b");
    }
}
