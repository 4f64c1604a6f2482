//! Utility modules for DOM access, escaping, and time.
//!
//! Provides:
//! - [`escape_html`], [`escape_text`] - HTML escaping
//! - [`format_clock`] - Message timestamp display
//! - [`now_ms`] - Wall clock in milliseconds

mod clock;
pub mod dom;
mod format;

pub use clock::now_ms;
pub use format::{escape_html, escape_text, format_clock};
