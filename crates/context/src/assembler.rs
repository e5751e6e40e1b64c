//! Context assembly: the session history into a bounded message list.
//!
//! # Algorithm
//!
//! 1. Filter inputs: drop missing, blank, and ignore-token inputs
//! 2. Keep the original indices, sorted ascending
//! 3. Take the last `num_messages` of them
//! 4. For each selected index: a `user` message for the input, then a
//!    `system` message for its output if one was recorded
//!
//! Ignored inputs never use up a slot, and an output is only ever attached
//! to an input that made it into the selection.

use crate::crafter::{craft_output_message, craft_user_message};
use crate::display::DisplayOptions;
use crate::filter::IgnoreTokens;
use crate::render::{OutputRenderer, detect_renderer, renderer_for};
use cellchat_config::AppConfig;
use cellchat_core::{Context, HistorySource};
use tracing::debug;

/// Default number of inputs included in a context.
pub const DEFAULT_NUM_MESSAGES: usize = 5;

/// The context assembler. Stateless between calls; create one and reuse it.
pub struct ContextAssembler {
    ignore: IgnoreTokens,
    renderer: Box<dyn OutputRenderer>,
    display: DisplayOptions,
    num_messages: usize,
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(IgnoreTokens::default(), detect_renderer(), DisplayOptions::default())
    }
}

impl ContextAssembler {
    pub fn new(
        ignore: IgnoreTokens,
        renderer: Box<dyn OutputRenderer>,
        display: DisplayOptions,
    ) -> Self {
        Self {
            ignore,
            renderer,
            display,
            num_messages: DEFAULT_NUM_MESSAGES,
        }
    }

    /// Build an assembler from loaded configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            IgnoreTokens::with_extra(config.context.extra_ignore_tokens.iter().cloned()),
            renderer_for(config.display.renderer),
            DisplayOptions::from(&config.display),
        )
        .with_num_messages(config.context.num_messages)
    }

    pub fn with_num_messages(mut self, num_messages: usize) -> Self {
        self.num_messages = num_messages;
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn OutputRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn num_messages(&self) -> usize {
        self.num_messages
    }

    pub fn ignore_tokens(&self) -> &IgnoreTokens {
        &self.ignore
    }

    pub fn display(&self) -> &DisplayOptions {
        &self.display
    }

    pub fn renderer_name(&self) -> &str {
        self.renderer.name()
    }

    /// Assemble with the configured `num_messages`.
    pub fn assemble(&self, history: &dyn HistorySource) -> Context {
        self.get_historical_context(history, self.num_messages)
    }

    /// Assemble a context from the last `num_messages` eligible inputs.
    pub fn get_historical_context(
        &self,
        history: &dyn HistorySource,
        num_messages: usize,
    ) -> Context {
        let mut total = 0usize;
        let mut eligible: Vec<(u64, &str)> = history
            .inputs()
            .inspect(|_| total += 1)
            .filter(|(_, text)| self.ignore.is_eligible(*text))
            .filter_map(|(index, text)| text.map(|t| (index, t)))
            .collect();
        eligible.sort_by_key(|(index, _)| *index);

        let start = eligible.len().saturating_sub(num_messages);
        let selected = &eligible[start..];

        let mut context = Context::new();
        for (index, text) in selected {
            context.push(craft_user_message(*text));
            if let Some(output) = history.output(*index) {
                context.push(craft_output_message(
                    output,
                    self.renderer.as_ref(),
                    &self.display,
                ));
            }
        }

        debug!(
            inputs = total,
            eligible = eligible.len(),
            selected = selected.len(),
            messages = context.len(),
            "Assembled historical context"
        );
        context
    }
}

/// Assemble a context with the default ignore tokens, renderer and display
/// options.
pub fn get_historical_context(history: &dyn HistorySource, num_messages: usize) -> Context {
    ContextAssembler::default().get_historical_context(history, num_messages)
}

// ── Tests ─────────────────────────────────────────────────────────────────
