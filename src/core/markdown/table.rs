//! Pipe-table detection and rendering.
//!
//! A candidate table is a maximal run of consecutive non-empty lines that
//! contain `|`. The run only becomes a table when some line after the first
//! is a separator row (`|---|:--:|`); everything above that row is header,
//! everything below is body. Runs that fail this check are left as they are.

/// Column alignment derived from the separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Alignment encoded by one separator cell (`:--:`, `--:`, `---`).
    fn from_separator_cell(cell: &str) -> Self {
        let cell = cell.trim();
        let left = cell.starts_with(':');
        let right = cell.ends_with(':');
        match (left, right) {
            (true, true) if cell.len() > 1 => Self::Center,
            (false, true) => Self::Right,
            _ => Self::Left,
        }
    }

    fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// A parsed pipe table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    pub header: Vec<Vec<String>>,
    pub body: Vec<Vec<String>>,
    pub alignments: Vec<Alignment>,
}

impl TableBlock {
    /// Build a table from a run of pipe rows.
    ///
    /// Returns `None` when the run is shorter than two lines, has no
    /// separator row, or starts with one (no header).
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        if rows.len() < 2 {
            return None;
        }

        let sep = rows.iter().position(|row| is_separator_row(row))?;
        if sep == 0 {
            return None;
        }

        let alignments = split_row(rows[sep])
            .iter()
            .map(|cell| Alignment::from_separator_cell(cell))
            .collect();

        Some(Self {
            header: rows[..sep].iter().map(|row| split_row(row)).collect(),
            body: rows[sep + 1..].iter().map(|row| split_row(row)).collect(),
            alignments,
        })
    }

    /// Alignment of a column; columns past the separator row are left-aligned.
    pub fn alignment(&self, column: usize) -> Alignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }

    /// Render as a single-line HTML table. Cell text is inserted verbatim.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<table><thead>");
        for row in &self.header {
            self.push_row(&mut html, row, "th");
        }
        html.push_str("</thead>");

        if !self.body.is_empty() {
            html.push_str("<tbody>");
            for row in &self.body {
                self.push_row(&mut html, row, "td");
            }
            html.push_str("</tbody>");
        }

        html.push_str("</table>");
        html
    }

    fn push_row(&self, html: &mut String, cells: &[String], tag: &str) {
        html.push_str("<tr>");
        for (column, cell) in cells.iter().enumerate() {
            let align = self.alignment(column).as_css();
            html.push_str(&format!("<{tag} style=\"text-align:{align}\">{cell}</{tag}>"));
        }
        html.push_str("</tr>");
    }
}

/// Whether a line can belong to a candidate table run.
pub fn is_pipe_row(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.contains('|')
}

/// Whether a line is a header/body separator: only `-`, `:`, `|` and
/// whitespace, with at least one `-`.
pub fn is_separator_row(line: &str) -> bool {
    let line = line.trim();
    line.contains('-')
        && line
            .chars()
            .all(|c| matches!(c, '-' | ':' | '|') || c.is_whitespace())
}

/// Number of consecutive pipe rows at the start of `lines`.
pub fn pipe_run_len<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .take_while(|line| is_pipe_row(line.as_ref()))
        .count()
}

/// Split a row into trimmed cells, dropping one outer pipe on each side.
pub fn split_row(row: &str) -> Vec<String> {
    let row = row.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    row.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Replace every valid pipe table in `text` with its HTML rendering.
///
/// Lines outside tables, and candidate runs that are not tables, are kept
/// byte for byte. The output contains no new pipe rows, so running it again
/// changes nothing.
pub fn parse_markdown_tables(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let run = pipe_run_len(&lines[i..]);
        if run == 0 {
            out.push(lines[i].to_string());
            i += 1;
            continue;
        }

        let rows = &lines[i..i + run];
        match TableBlock::from_rows(rows) {
            Some(table) => out.push(table.to_html()),
            None => out.extend(rows.iter().map(|row| row.to_string())),
        }
        i += run;
    }

    out.join("\n")
}
