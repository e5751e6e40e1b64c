//! `cellchat context` — Build the chat context from a session history file.

use cellchat_config::RendererKind;
use cellchat_context::{ContextAssembler, PlainRenderer};
use cellchat_core::SessionHistory;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct ContextArgs {
    pub history: PathBuf,
    pub num_messages: Option<usize>,
    pub seed: Option<u64>,
    pub plain: bool,
    pub compact: bool,
}

pub fn run(
    config_path: Option<&Path>,
    args: ContextArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        super::load_config(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let history = SessionHistory::load_from(&args.history)?;

    let mut assembler = ContextAssembler::from_config(&config);
    if let Some(n) = args.num_messages {
        assembler = assembler.with_num_messages(n);
    }
    if args.plain || config.display.renderer == RendererKind::Plain {
        assembler = assembler.with_renderer(Box::new(PlainRenderer));
    } else if let Some(seed) = args.seed {
        assembler = with_seeded_renderer(assembler, seed);
    }

    let context = assembler.assemble(&history);
    info!(
        messages = context.len(),
        renderer = assembler.renderer_name(),
        "Built context from {}",
        args.history.display()
    );

    let json = if args.compact {
        serde_json::to_string(&context)?
    } else {
        serde_json::to_string_pretty(&context)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(feature = "tabular")]
fn with_seeded_renderer(assembler: ContextAssembler, seed: u64) -> ContextAssembler {
    assembler.with_renderer(Box::new(cellchat_context::TabularRenderer::with_seed(seed)))
}

#[cfg(not(feature = "tabular"))]
fn with_seeded_renderer(assembler: ContextAssembler, _seed: u64) -> ContextAssembler {
    tracing::warn!("--seed has no effect without tabular rendering");
    assembler
}
