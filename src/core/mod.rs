//! Core logic for the chat widget.
//!
//! This module provides:
//! - [`markdown`] reply transformation (tables, blocks, inline rules)
//! - [`sanitize`] allow-list HTML sanitization
//! - [`render_message`] the user/assistant rendering boundary
//! - [`send_message`] the backend request and [`identity`] the client id

pub mod chat;
pub mod error;
pub mod identity;
pub mod markdown;
mod render;
pub mod sanitize;

pub use chat::send_message;
pub use render::{render_markdown, render_message};
