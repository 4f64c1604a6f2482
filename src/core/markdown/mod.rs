//! Markdown-to-HTML transformer for assistant replies.
//!
//! Supports the reply dialect only: fenced and inline code, pipe tables,
//! headings, horizontal rules, block quotes, flat bullet/numbered lists,
//! images, links, bold, italic and strikethrough. Anything else is passed
//! through as text.
//!
//! The output is NOT safe to insert as-is: raw HTML in the input survives.
//! Always pass it through [`crate::core::sanitize`].

mod block;
mod inline;
mod protect;
mod table;

pub use block::Block;
pub use table::{Alignment, TableBlock, parse_markdown_tables};

use block::tokenize;
use inline::is_soft_break;
use protect::{ProtectedSpans, strip_sentinels};

/// Convert a reply to HTML.
///
/// 1. Code fences and code spans are escaped and parked
/// 2. Lines are tokenized into blocks (tables, headings, quotes, lists, ...)
/// 3. Inline rules run inside text-bearing blocks
/// 4. Parked code is restored
pub fn to_html(markdown: &str) -> String {
    if markdown.trim().is_empty() {
        return String::new();
    }

    let normalized = markdown.replace("\r\n", "\n");
    let source = strip_sentinels(&normalized);

    let mut spans = ProtectedSpans::new();
    let blocks = tokenize(&source, &mut spans);

    let rendered: Vec<String> = blocks.iter().map(Block::to_html).collect();
    spans.restore(&join_blocks(&rendered))
}

/// Join rendered blocks with newlines. The soft-break rule applies across
/// block boundaries too, so a parked code block next to text gets the same
/// `<br>` an inline code span would.
fn join_blocks(rendered: &[String]) -> String {
    let mut out = String::new();
    for (i, html) in rendered.iter().enumerate() {
        if i > 0 {
            if is_soft_break(&rendered[i - 1], html) {
                out.push_str("<br>");
            }
            out.push('\n');
        }
        out.push_str(html);
    }
    out
}
