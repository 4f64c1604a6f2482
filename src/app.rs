//! Root application module.
//!
//! Contains the main App component, AppContext definition, ChatState,
//! and application-level setup logic following Leptos conventions.

use leptos::prelude::*;

use crate::components::ChatWidget;
use crate::config::{APP_NAME, APP_VERSION, WELCOME_MESSAGE};
use crate::core::identity;
use crate::models::Message;

// ============================================================================
// ChatState
// ============================================================================

/// Chat state managed with Leptos signals.
///
/// The message log only grows. `pending` is a latch rather than a queue:
/// while a reply is outstanding no second request can start.
///
/// # Note
///
/// This struct is `Copy` because all fields are Leptos signals, which are
/// cheap to copy (they're just pointers to the underlying reactive state).
#[derive(Clone, Copy)]
pub struct ChatState {
    /// Message log in display order.
    pub messages: RwSignal<Vec<Message>>,
    /// Whether a reply request is in flight.
    pub pending: RwSignal<bool>,
}

impl ChatState {
    /// Creates a chat state holding only the welcome message.
    pub fn new() -> Self {
        Self {
            messages: RwSignal::new(vec![Message::assistant(WELCOME_MESSAGE)]),
            pending: RwSignal::new(false),
        }
    }

    /// Appends a message to the log.
    pub fn push(&self, message: Message) {
        self.messages.update(|m| m.push(message));
    }

    /// Takes the request latch. Returns `false` if a request is already
    /// pending, in which case nothing changes.
    pub fn begin_request(&self) -> bool {
        if self.pending.get_untracked() {
            return false;
        }
        self.pending.set(true);
        true
    }

    /// Releases the request latch.
    pub fn finish_request(&self) {
        self.pending.set(false);
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Message log and request latch.
    pub chat: ChatState,

    /// Client identity, established once at startup.
    pub client_id: StoredValue<String>,
}

impl AppContext {
    /// Creates a new application context, loading or creating the client id.
    pub fn new() -> Self {
        Self {
            chat: ChatState::new(),
            client_id: StoredValue::new(identity::load_or_create()),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component.
///
/// Creates and provides the global AppContext, then renders the chat widget.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    web_sys::console::log_1(&format!("{APP_NAME} v{APP_VERSION} ready").into());

    view! { <ChatWidget /> }
}
