//! UI components built with Leptos.
//!
//! - [`chat`] - Chat widget (message log, bubbles, composer)
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod chat;
pub mod icons;

pub use chat::ChatWidget;
