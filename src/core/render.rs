//! Message rendering: the single place that decides what becomes markup.
//!
//! User text is only ever escaped. Assistant replies go through the markdown
//! transformer and then the sanitizer. The returned string is the only thing
//! the UI writes with `inner_html`.

use crate::core::markdown::to_html;
use crate::core::sanitize::sanitize;
use crate::models::{Message, Role};
use crate::utils::escape_html;

/// Render a message bubble's inner HTML.
pub fn render_message(message: &Message) -> String {
    match message.role {
        Role::Assistant if message.is_html => render_markdown(&message.text),
        _ => escape_html(&message.text),
    }
}

/// Markdown → HTML → sanitized HTML.
pub fn render_markdown(markdown: &str) -> String {
    sanitize(&to_html(markdown))
}
