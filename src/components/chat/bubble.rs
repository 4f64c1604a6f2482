use leptos::prelude::*;
use leptos_icons::Icon;

use crate::components::icons as ic;
use crate::core::render_message;
use crate::models::{Message, Role};
use crate::utils::format_clock;

stylance::import_crate_style!(css, "src/components/chat/bubble.module.css");

/// CSS class for a message. Plain assistant text is a notice.
fn bubble_class(message: &Message) -> &'static str {
    match message.role {
        Role::User => css::user,
        Role::Assistant if message.is_html => css::assistant,
        Role::Assistant => css::notice,
    }
}

#[component]
pub fn Bubble(message: Message) -> impl IntoView {
    let html = render_message(&message);
    let class_name = format!("{} {}", css::bubble, bubble_class(&message));
    let icon = match message.role {
        Role::User => ic::USER,
        Role::Assistant => ic::BOT,
    };
    let row_class = match message.role {
        Role::User => format!("{} {}", css::row, css::rowUser),
        Role::Assistant => css::row.to_string(),
    };

    view! {
        <div class=row_class>
            <span class=css::avatar><Icon icon=icon /></span>
            <div class=class_name>
                <div class=css::body inner_html=html></div>
                <time class=css::time>{format_clock(message.timestamp)}</time>
            </div>
        </div>
    }
}
