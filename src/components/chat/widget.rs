//! Chat widget container.
//!
//! Owns the message log view, the thinking indicator and the submit flow
//! that turns a user message into a backend request.

use leptos::leptos_dom::helpers::request_animation_frame;
use leptos::prelude::*;
use leptos_icons::Icon;

use super::{Bubble, Composer};
use crate::app::{AppContext, ChatState};
use crate::components::icons as ic;
use crate::config::{APP_NAME, INPUT_SELECTOR};
use crate::core::send_message;
use crate::models::Message;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/chat/widget.module.css");

// ============================================================================
// Effect Setup Functions
// ============================================================================

/// Auto-scroll the log to the bottom when messages arrive or the thinking
/// indicator toggles.
fn setup_autoscroll_effect(chat: ChatState, log_ref: NodeRef<leptos::html::Div>) {
    Effect::new(move || {
        chat.messages.track();
        chat.pending.track();
        if let Some(el) = log_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });
}

// ============================================================================
// Submit Flow
// ============================================================================

/// Build the submit callback.
///
/// Returns `true` when the text was accepted, so the composer knows to clear
/// itself. Whitespace-only text and submits while a reply is pending are
/// rejected without side effects.
fn create_submit_callback(ctx: AppContext) -> Callback<String, bool> {
    Callback::new(move |text: String| {
        if text.trim().is_empty() {
            return false;
        }
        if !ctx.chat.begin_request() {
            return false;
        }

        ctx.chat.push(Message::user(text.clone()));
        let client_id = ctx.client_id.get_value();

        wasm_bindgen_futures::spawn_local(async move {
            match send_message(&text, &client_id).await {
                Ok(reply) => ctx.chat.push(Message::assistant(reply)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("Chat request failed: {e:?}").into());
                    ctx.chat.push(Message::notice(e.to_string()));
                }
            }
            ctx.chat.finish_request();
            // The textarea re-enables on the next render
            request_animation_frame(|| {
                dom::focus_element(INPUT_SELECTOR);
            });
        });

        true
    })
}

// ============================================================================
// ChatWidget Component
// ============================================================================

/// Chat widget with header, message log and composer.
#[component]
pub fn ChatWidget() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let log_ref = NodeRef::<leptos::html::Div>::new();
    setup_autoscroll_effect(ctx.chat, log_ref);

    let on_submit = create_submit_callback(ctx);
    let pending = ctx.chat.pending;

    view! {
        <div class=css::widget>
            <header class=css::header>
                <span class=css::headerIcon><Icon icon=ic::BOT /></span>
                <span class=css::title>{APP_NAME}</span>
            </header>

            <div class=css::log node_ref=log_ref>
                <For
                    each=move || ctx.chat.messages.get()
                    key=|message| message.id.clone()
                    children=|message| view! { <Bubble message=message /> }
                />
                <Show when=move || pending.get()>
                    <div class=css::thinking>
                        <span class=css::dot></span>
                        <span class=css::dot></span>
                        <span class=css::dot></span>
                    </div>
                </Show>
            </div>

            <Composer on_submit=on_submit pending=pending />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_context() -> AppContext {
        AppContext {
            chat: ChatState::new(),
            client_id: StoredValue::new("0123456789abcdef0123456789abcdef".to_string()),
        }
    }

    #[test]
    fn test_whitespace_submit_rejected() {
        let owner = Owner::new();
        owner.set();

        let ctx = test_context();
        let submit = create_submit_callback(ctx);

        assert!(!submit.run(String::new()));
        assert!(!submit.run("  \n\t ".to_string()));
        assert_eq!(ctx.chat.messages.get_untracked().len(), 1);
        assert!(!ctx.chat.pending.get_untracked());
    }

    #[test]
    fn test_submit_rejected_while_pending() {
        let owner = Owner::new();
        owner.set();

        let ctx = test_context();
        assert!(ctx.chat.begin_request());

        let submit = create_submit_callback(ctx);
        assert!(!submit.run("hello".to_string()));
        assert_eq!(ctx.chat.messages.get_untracked().len(), 1);
        assert!(ctx.chat.pending.get_untracked());
    }
}
