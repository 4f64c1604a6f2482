//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`Message`], [`Role`] - Chat log entries

mod message;

pub use message::{Message, Role};
