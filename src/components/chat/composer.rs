//! Message composer: multi-line input and send button.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use wasm_bindgen::JsCast;

use crate::components::icons as ic;
use crate::config::INPUT_PLACEHOLDER;

stylance::import_crate_style!(css, "src/components/chat/composer.module.css");

/// Input box with a send button.
///
/// Enter submits, Shift+Enter inserts a newline. The text is cleared only
/// when `on_submit` accepts it.
#[component]
pub fn Composer(on_submit: Callback<String, bool>, pending: RwSignal<bool>) -> impl IntoView {
    let input_ref = NodeRef::<leptos::html::Textarea>::new();
    let (input_value, set_input_value) = signal(String::new());

    // Focus input on mount
    Effect::new(move || {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
        }
    });

    let submit = move || {
        if on_submit.run(input_value.get_untracked()) {
            set_input_value.set(String::new());
        }
    };

    let handle_keydown = move |ev: ev::KeyboardEvent| {
        // Composing IME text also reports Enter
        if ev.key() == "Enter" && !ev.shift_key() && !ev.is_composing() {
            ev.prevent_default();
            submit();
        }
    };

    let handle_input = move |ev: ev::Event| {
        let Some(target) = ev.target() else { return };
        let input = target.unchecked_into::<web_sys::HtmlTextAreaElement>();
        set_input_value.set(input.value());
    };

    let is_empty = move || input_value.get().trim().is_empty();

    view! {
        <div class=css::composer>
            <textarea
                node_ref=input_ref
                class=css::input
                rows="1"
                placeholder=INPUT_PLACEHOLDER
                prop:value=input_value
                prop:disabled=move || pending.get()
                on:input=handle_input
                on:keydown=handle_keydown
            ></textarea>
            <button
                class=css::send
                title="Send"
                disabled=move || pending.get() || is_empty()
                on:click=move |_| submit()
            >
                <Icon icon=ic::SEND />
            </button>
        </div>
    }
}
