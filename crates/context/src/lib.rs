//! Chat context assembly for notebook sessions.
//!
//! Turns a session's input/output history into a bounded, ordered list of
//! role-tagged messages:
//!
//! 1. **Filter**: drop blank inputs and inputs starting with an ignore token
//! 2. **Select**: keep the most recent `num_messages` eligible inputs
//! 3. **Craft**: each input becomes a `user` message, followed by a
//!    `system` message for the value it produced (if any)
//!
//! Outputs are rendered through an [`OutputRenderer`]. With the `tabular`
//! feature, tables and series are sampled down to the display caps and
//! rendered as markdown; otherwise every value uses its generic
//! representation.

pub mod assembler;
pub mod crafter;
pub mod display;
pub mod filter;
pub mod render;

pub use assembler::{ContextAssembler, get_historical_context};
pub use crafter::{craft_output_message, craft_output_message_default, craft_user_message};
pub use display::DisplayOptions;
pub use filter::{DEFAULT_IGNORE_TOKENS, IgnoreTokens};
pub use render::{OutputRenderer, PlainRenderer, RenderError, detect_renderer, renderer_for};

#[cfg(feature = "tabular")]
pub use render::TabularRenderer;
