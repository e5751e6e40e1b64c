//! Output renderers.
//!
//! A renderer turns the value a cell produced into the text of a `system`
//! message. The renderer is chosen once, up front:
//!
//! | Renderer | Tables / series | Everything else |
//! |----------|-----------------|-----------------|
//! | [`PlainRenderer`] | generic representation | generic representation |
//! | `TabularRenderer` (feature `tabular`) | sampled markdown table | generic representation |

#[cfg(feature = "tabular")]
mod markdown;
#[cfg(feature = "tabular")]
mod tabular;

#[cfg(feature = "tabular")]
pub use tabular::TabularRenderer;

use crate::display::DisplayOptions;
use cellchat_config::RendererKind;
use cellchat_core::OutputValue;

/// Renders a cell output to message text.
pub trait OutputRenderer: Send + Sync {
    /// Renderer name (for logs).
    fn name(&self) -> &str;

    /// Render `value` under `display`.
    ///
    /// An error means the value could not be rendered by this renderer;
    /// callers fall back to [`OutputValue::repr`].
    fn render(
        &self,
        value: &OutputValue,
        display: &DisplayOptions,
    ) -> Result<String, RenderError>;
}

/// Errors from rendering a single value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Malformed table ({rows} rows x {columns} columns): {reason}")]
    MalformedTable {
        rows: usize,
        columns: usize,
        reason: String,
    },

    #[error("Malformed series ({len} values): {reason}")]
    MalformedSeries { len: usize, reason: String },
}

/// Renders every value with its generic representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl OutputRenderer for PlainRenderer {
    fn name(&self) -> &str {
        "plain"
    }

    fn render(
        &self,
        value: &OutputValue,
        _display: &DisplayOptions,
    ) -> Result<String, RenderError> {
        Ok(value.repr())
    }
}

/// The best renderer this build supports.
pub fn detect_renderer() -> Box<dyn OutputRenderer> {
    #[cfg(feature = "tabular")]
    {
        Box::new(TabularRenderer::new())
    }
    #[cfg(not(feature = "tabular"))]
    {
        Box::new(PlainRenderer)
    }
}

/// The renderer for a configured kind.
///
/// Asking for `tabular` in a build without the feature degrades to plain.
pub fn renderer_for(kind: RendererKind) -> Box<dyn OutputRenderer> {
    match kind {
        RendererKind::Auto => detect_renderer(),
        RendererKind::Plain => Box::new(PlainRenderer),
        RendererKind::Tabular => {
            #[cfg(feature = "tabular")]
            {
                Box::new(TabularRenderer::new())
            }
            #[cfg(not(feature = "tabular"))]
            {
                tracing::warn!("Tabular rendering not available in this build, using plain");
                Box::new(PlainRenderer)
            }
        }
    }
}
