//! Chat widget components.

mod bubble;
mod composer;
mod widget;

pub use bubble::Bubble;
pub use composer::Composer;
pub use widget::ChatWidget;
