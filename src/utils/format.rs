//! Formatting utilities for escaping and display values.

/// Escape text for use as HTML character data.
///
/// Only `&`, `<` and `>` are replaced; quotes are left alone because the
/// result is never placed inside an attribute.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text so it is inert both as character data and inside a quoted
/// attribute value.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format a millisecond Unix timestamp as a UTC wall-clock time (`HH:MM`).
pub fn format_clock(timestamp_ms: i64) -> String {
    let secs = timestamp_ms.div_euclid(1000);
    let day_secs = secs.rem_euclid(86_400);
    format!("{:02}:{:02}", day_secs / 3600, (day_secs % 3600) / 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_text(r#"say "hi""#), r#"say "hi""#);
    }

    #[test]
    fn test_escape_html_quotes() {
        assert_eq!(
            escape_html(r#"<img src="x" onerror='y'>"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;y&#39;&gt;"
        );
    }

    #[test]
    fn test_escape_empty() {
        assert_eq!(escape_text(""), "");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        // 2024-01-01T13:05:59Z
        assert_eq!(format_clock(1_704_114_359_000), "13:05");
        assert_eq!(format_clock(-60_000), "23:59");
    }
}
