//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Application Metadata
// =============================================================================

/// Widget title shown in the header.
pub const APP_NAME: &str = "Assistant";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// First assistant message shown when the widget opens.
pub const WELCOME_MESSAGE: &str =
    "Hi! Ask me anything. I can answer with **formatting**, `code`, lists and tables.";

// =============================================================================
// Network Configuration
// =============================================================================

/// Chat backend endpoint receiving `POST {"message", "client_id"}`.
pub const CHAT_ENDPOINT: &str = "/api/chat";

// =============================================================================
// Storage Configuration
// =============================================================================

/// localStorage key for the persisted client identity.
pub const CLIENT_ID_KEY: &str = "chat_client_id";

// =============================================================================
// UI Configuration
// =============================================================================

/// Placeholder text of the message box.
pub const INPUT_PLACEHOLDER: &str = "Type a message… (Shift+Enter for a new line)";

/// Selector of the message box, used to return focus after a reply.
pub const INPUT_SELECTOR: &str = "textarea";

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
