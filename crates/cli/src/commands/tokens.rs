//! `cellchat tokens` — List the effective ignore tokens.

use cellchat_context::{DEFAULT_IGNORE_TOKENS, IgnoreTokens};
use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        super::load_config(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let tokens = IgnoreTokens::with_extra(config.context.extra_ignore_tokens.iter().cloned());

    for token in tokens.tokens() {
        let origin = if DEFAULT_IGNORE_TOKENS.contains(&token.as_str()) {
            "built-in"
        } else {
            "config"
        };
        println!("{token:<20} {origin}");
    }
    Ok(())
}
