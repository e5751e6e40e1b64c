//! Message crafting: one input or one output value into one message.

use crate::display::DisplayOptions;
use crate::render::{OutputRenderer, detect_renderer};
use cellchat_core::{Message, OutputValue};
use tracing::debug;

/// Wrap a cell input verbatim as a `user` message.
pub fn craft_user_message(text: impl Into<String>) -> Message {
    Message::user(text)
}

/// Render a cell output as a `system` message.
///
/// Never fails: a value the renderer rejects is rendered with its generic
/// representation instead.
pub fn craft_output_message(
    value: &OutputValue,
    renderer: &dyn OutputRenderer,
    display: &DisplayOptions,
) -> Message {
    let content = match renderer.render(value, display) {
        Ok(content) => content,
        Err(e) => {
            debug!(
                renderer = renderer.name(),
                error = %e,
                "Falling back to generic representation"
            );
            value.repr()
        }
    };
    Message::system(content)
}

/// [`craft_output_message`] with the detected renderer and default display
/// options.
pub fn craft_output_message_default(value: &OutputValue) -> Message {
    craft_output_message(value, detect_renderer().as_ref(), &DisplayOptions::default())
}
