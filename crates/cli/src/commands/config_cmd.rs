//! `cellchat config` — Configuration management commands.

use cellchat_config::AppConfig;
use std::path::Path;

pub fn validate(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match super::load_config(config_path) {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();

            if config.context.num_messages == 0 {
                warnings.push("context.num_messages = 0 always yields an empty context");
            }

            if config.display.max_columns > 100 {
                warnings.push("display.max_columns above 100 makes table outputs very large");
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Messages:  {}", config.context.num_messages);
            println!("   Renderer:  {:?}", config.display.renderer);
            println!(
                "   Caps:      {} rows x {} columns",
                config.display.max_rows, config.display.max_columns
            );
            println!("   Extra ignore tokens: {}", config.context.extra_ignore_tokens.len());
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        super::load_config(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::config_path);
    println!("{}", path.display());
    Ok(())
}
