pub mod config_cmd;
pub mod context;
pub mod tokens;

use cellchat_config::{AppConfig, ConfigError};
use std::path::Path;

/// Load configuration from `path` if given, otherwise from the default
/// location, with environment overrides applied.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => {
            let mut config = AppConfig::load_from(path)?;
            config.apply_env_overrides(|key| std::env::var(key).ok())?;
            config.validate()?;
            Ok(config)
        }
        None => AppConfig::load(),
    }
}
