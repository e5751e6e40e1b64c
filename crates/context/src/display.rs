//! Display options for rendering cell outputs.
//!
//! Passed explicitly into every render call. Nothing here is global, so a
//! caller's own options never change as a side effect of rendering.

use cellchat_config::DisplayConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// Maximum rows shown for a table or series.
    pub max_rows: usize,
    /// Maximum columns shown for a table.
    pub max_columns: usize,
    /// Append table schema metadata to rendered tables.
    pub table_schema: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            max_rows: 5,
            max_columns: 20,
            table_schema: false,
        }
    }
}

impl DisplayOptions {
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    pub fn with_table_schema(mut self, table_schema: bool) -> Self {
        self.table_schema = table_schema;
        self
    }
}

impl From<&DisplayConfig> for DisplayOptions {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            max_rows: config.max_rows,
            max_columns: config.max_columns,
            table_schema: config.table_schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config_defaults() {
        let from_config = DisplayOptions::from(&DisplayConfig::default());
        assert_eq!(from_config, DisplayOptions::default());
    }

    #[test]
    fn builders_do_not_touch_original() {
        let base = DisplayOptions::default();
        let narrowed = base.with_max_rows(2).with_table_schema(true);
        assert_eq!(base.max_rows, 5);
        assert!(!base.table_schema);
        assert_eq!(narrowed.max_rows, 2);
        assert!(narrowed.table_schema);
    }
}
