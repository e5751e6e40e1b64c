//! Table and series aware rendering.
//!
//! Large tables are cut down to the display caps by uniform random sampling
//! without replacement, columns first and then rows of the column-reduced
//! table. Sampled positions keep their original relative order.

use super::markdown::pipe_table;
use super::{OutputRenderer, RenderError};
use crate::display::DisplayOptions;
use cellchat_core::value::cell_text;
use cellchat_core::{OutputValue, Series, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};

/// Renders tables and series as sampled markdown tables.
///
/// With a seed, the same value always renders the same way.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabularRenderer {
    seed: Option<u64>,
}

impl TabularRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    fn render_table(&self, table: &Table, display: &DisplayOptions) -> Result<String, RenderError> {
        let (rows, columns) = table.shape();
        if !table.is_well_formed() {
            return Err(RenderError::MalformedTable {
                rows,
                columns,
                reason: "row width or index length does not match the columns".into(),
            });
        }

        let mut rng = self.rng();
        let column_positions = sample_positions(&mut rng, columns, display.max_columns);
        let row_positions = sample_positions(&mut rng, rows, display.max_rows);

        let index = table.index_labels();
        let mut headers = vec![String::new()];
        headers.extend(column_positions.iter().map(|&c| table.columns[c].clone()));

        let body: Vec<Vec<String>> = row_positions
            .iter()
            .map(|&r| {
                let mut line = vec![index[r].clone()];
                line.extend(column_positions.iter().map(|&c| cell_text(&table.data[r][c])));
                line
            })
            .collect();

        let mut out = pipe_table(&headers, &body);
        if display.table_schema {
            let fields: Vec<Value> = column_positions
                .iter()
                .map(|&c| {
                    let cells = table.data.iter().map(|row| &row[c]);
                    json!({"name": table.columns[c], "type": field_type(cells)})
                })
                .collect();
            let schema = json!({"fields": fields, "primaryKey": ["index"]});
            out.push_str(&format!("\n\nschema: {schema}"));
        }
        Ok(out)
    }

    fn render_series(
        &self,
        series: &Series,
        display: &DisplayOptions,
    ) -> Result<String, RenderError> {
        if !series.is_well_formed() {
            return Err(RenderError::MalformedSeries {
                len: series.len(),
                reason: "index length does not match the values".into(),
            });
        }

        let mut rng = self.rng();
        let positions = sample_positions(&mut rng, series.len(), display.max_rows);

        let index = series.index_labels();
        let header = series.name.clone().unwrap_or_else(|| "0".into());
        let headers = vec![String::new(), header];
        let body: Vec<Vec<String>> = positions
            .iter()
            .map(|&i| vec![index[i].clone(), cell_text(&series.values[i])])
            .collect();

        Ok(pipe_table(&headers, &body))
    }
}

impl OutputRenderer for TabularRenderer {
    fn name(&self) -> &str {
        "tabular"
    }

    fn render(&self, value: &OutputValue, display: &DisplayOptions) -> Result<String, RenderError> {
        match value {
            OutputValue::Table(table) => self.render_table(table, display),
            OutputValue::Series(series) => self.render_series(series, display),
            other => Ok(other.repr()),
        }
    }
}

/// Pick `min(cap, len)` distinct positions out of `0..len`, in ascending order.
fn sample_positions(rng: &mut StdRng, len: usize, cap: usize) -> Vec<usize> {
    let amount = cap.min(len);
    let mut positions = rand::seq::index::sample(rng, len, amount).into_vec();
    positions.sort_unstable();
    positions
}

/// Table schema field type for a column.
fn field_type<'a>(cells: impl Iterator<Item = &'a Value>) -> &'static str {
    let mut kind: Option<&'static str> = None;
    for cell in cells {
        let this = match cell {
            Value::Null => continue,
            Value::Bool(_) => "boolean",
            Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            _ => "any",
        };
        kind = match (kind, this) {
            (None, t) => Some(t),
            (Some(k), t) if k == t => Some(k),
            (Some("integer"), "number") | (Some("number"), "integer") => Some("number"),
            _ => return "any",
        };
    }
    kind.unwrap_or("any")
}
