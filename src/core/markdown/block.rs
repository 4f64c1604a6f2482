//! Block tokenizer.
//!
//! Splits a document into block-level units before any inline work happens:
//! code fences are parked first, pipe tables are recognised next, and every
//! remaining line is classified exactly once. Inline rules only ever run on
//! the text of paragraphs, headings, quotes and list items.

use super::inline::{render_inline, render_lines};
use super::protect::ProtectedSpans;
use super::table::{TableBlock, pipe_run_len};

/// A block-level unit of the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Empty line, kept so the output mirrors the input's spacing
    Blank,
    /// Consecutive text lines
    Paragraph(Vec<String>),
    /// `#` .. `######`
    Heading { level: u8, text: String },
    /// `---`, `***`, `___`
    Rule,
    /// Adjacent `>` lines merged into one quote
    Quote(Vec<String>),
    /// Contiguous run of items of one kind
    List { ordered: bool, items: Vec<String> },
    /// Pipe table
    Table(TableBlock),
    /// Token of a parked fenced code block
    Code(String),
}

impl Block {
    /// Render this block. Code blocks render as their token.
    pub fn to_html(&self) -> String {
        match self {
            Self::Blank => String::new(),
            Self::Paragraph(lines) => render_lines(lines),
            Self::Heading { level, text } => {
                format!("<h{level}>{}</h{level}>", render_inline(text))
            }
            Self::Rule => "<hr>".to_string(),
            Self::Quote(lines) => format!("<blockquote>{}</blockquote>", render_lines(lines)),
            Self::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                let items: Vec<String> = items
                    .iter()
                    .map(|item| format!("<li>{}</li>", render_inline(item)))
                    .collect();
                format!("<{tag}>{}</{tag}>", items.join("\n"))
            }
            Self::Table(table) => table.to_html(),
            Self::Code(token) => token.clone(),
        }
    }
}

/// A source line after code protection.
enum Line {
    Code(String),
    Text(String),
}

/// Code lines read as empty, so they never join a pipe run.
impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        match self {
            Self::Code(_) => "",
            Self::Text(text) => text,
        }
    }
}

/// Tokenize `markdown` into blocks, parking code in `spans`.
pub fn tokenize(markdown: &str, spans: &mut ProtectedSpans) -> Vec<Block> {
    let lines = protect_code(markdown, spans);
    let mut blocks: Vec<Block> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let text = match &lines[i] {
            Line::Code(token) => {
                blocks.push(Block::Code(token.clone()));
                i += 1;
                continue;
            }
            Line::Text(text) => text,
        };

        let run_len = pipe_run_len(&lines[i..]);
        if run_len >= 2 {
            let run: Vec<&str> = lines[i..i + run_len].iter().map(<Line as AsRef<str>>::as_ref).collect();
            match TableBlock::from_rows(&run) {
                Some(table) => push_block(&mut blocks, Block::Table(table)),
                None => {
                    // A rejected run is consumed whole, never re-scanned
                    // from its second line.
                    for row in &run {
                        push_block(&mut blocks, classify(row));
                    }
                }
            }
            i += run_len;
            continue;
        }

        push_block(&mut blocks, classify(text));
        i += 1;
    }

    blocks
}

/// Append a block, merging it into the previous one when both belong to the
/// same run (paragraph lines, quote lines, list items of one kind).
fn push_block(blocks: &mut Vec<Block>, block: Block) {
    match (blocks.last_mut(), block) {
        (Some(Block::Paragraph(lines)), Block::Paragraph(more)) => lines.extend(more),
        (Some(Block::Quote(lines)), Block::Quote(more)) => lines.extend(more),
        (
            Some(Block::List { ordered, items }),
            Block::List {
                ordered: next_ordered,
                items: more,
            },
        ) if *ordered == next_ordered => items.extend(more),
        (_, block) => blocks.push(block),
    }
}

// =============================================================================
// Code Protection
// =============================================================================

fn protect_code(markdown: &str, spans: &mut ProtectedSpans) -> Vec<Line> {
    let lines: Vec<&str> = markdown.split('\n').collect();
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(body) = single_line_fence(line) {
            out.push(Line::Code(spans.protect_block(None, body)));
            i += 1;
            continue;
        }

        if let Some(lang) = fence_open(line)
            && let Some(close) = lines[i + 1..].iter().position(|l| is_fence_close(l))
        {
            let body = lines[i + 1..i + 1 + close].join("\n");
            out.push(Line::Code(spans.protect_block(lang, &body)));
            i += close + 2;
            continue;
        }

        out.push(Line::Text(spans.protect_code_spans(line)));
        i += 1;
    }

    out
}

/// Opening fence: returns the language tag, if any.
fn fence_open(line: &str) -> Option<Option<&str>> {
    let info = line.trim_start().strip_prefix("```")?;
    let info = info.trim();
    let end = info
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(info.len());
    let lang = &info[..end];
    Some((!lang.is_empty()).then_some(lang))
}

fn is_fence_close(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("```") && line.trim_start_matches('`').is_empty()
}

/// ```` ```code``` ```` on one line.
fn single_line_fence(line: &str) -> Option<&str> {
    let body = line.trim().strip_prefix("```")?.strip_suffix("```")?;
    let body = body.trim();
    (!body.is_empty() && !body.contains('`')).then_some(body)
}

// =============================================================================
// Line Classification
// =============================================================================

fn classify(line: &str) -> Block {
    if line.trim().is_empty() {
        return Block::Blank;
    }
    if is_rule(line) {
        return Block::Rule;
    }
    if let Some((level, text)) = heading(line) {
        return Block::Heading {
            level,
            text: text.to_string(),
        };
    }
    if let Some(text) = quote(line) {
        return Block::Quote(vec![text.to_string()]);
    }
    if let Some(item) = bullet_item(line) {
        return Block::List {
            ordered: false,
            items: vec![item.to_string()],
        };
    }
    if let Some(item) = ordered_item(line) {
        return Block::List {
            ordered: true,
            items: vec![item.to_string()],
        };
    }
    Block::Paragraph(vec![line.to_string()])
}

/// Three or more of the same `-`, `*` or `_`.
fn is_rule(line: &str) -> bool {
    let line = line.trim();
    let mut chars = line.chars();
    match chars.next() {
        Some(c @ ('-' | '*' | '_')) => line.len() >= 3 && chars.all(|other| other == c),
        _ => false,
    }
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let text = line[hashes..].strip_prefix(' ')?.trim();
    (!text.is_empty()).then_some((hashes as u8, text))
}

fn quote(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

fn bullet_item(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let mut chars = line.chars();
    if !matches!(chars.next(), Some('-' | '*' | '+')) || chars.next() != Some(' ') {
        return None;
    }
    let item = line[2..].trim();
    // A stray separator remnant such as `- --|--` is not an item.
    let separator_only = item
        .chars()
        .all(|c| matches!(c, '-' | ':' | '|') || c.is_whitespace());
    (!separator_only).then_some(item)
}

fn ordered_item(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let item = line[digits..].strip_prefix(". ")?.trim();
    (!item.is_empty()).then_some(item)
}
