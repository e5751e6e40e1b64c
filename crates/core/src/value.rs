//! Values produced by notebook cells.
//!
//! The session runtime hands us whatever a cell returned. We only care about
//! three shapes: 2-D tables, 1-D labeled series, and everything else. Every
//! value has a generic text representation ([`OutputValue::repr`]) that is
//! used whenever no richer rendering is available.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A 2-D table: column labels, optional row labels and row-major cells.
///
/// An empty `index` means the rows are labeled `0..n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index: Vec<String>,

    pub data: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>, data: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            index: Vec::new(),
            data,
        }
    }

    pub fn with_index(mut self, index: Vec<String>) -> Self {
        self.index = index;
        self
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.data.len(), self.columns.len())
    }

    /// Row labels, falling back to positional labels when none were recorded.
    pub fn index_labels(&self) -> Vec<String> {
        labels_or_positions(&self.index, self.data.len())
    }

    /// Every row has one cell per column and the index (if any) matches the
    /// row count.
    pub fn is_well_formed(&self) -> bool {
        let width = self.columns.len();
        self.data.iter().all(|row| row.len() == width)
            && (self.index.is_empty() || self.index.len() == self.data.len())
    }
}

/// A 1-D labeled sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index: Vec<String>,

    pub values: Vec<Value>,
}

impl Series {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            name: None,
            index: Vec::new(),
            values,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_index(mut self, index: Vec<String>) -> Self {
        self.index = index;
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn index_labels(&self) -> Vec<String> {
        labels_or_positions(&self.index, self.values.len())
    }

    pub fn is_well_formed(&self) -> bool {
        self.index.is_empty() || self.index.len() == self.values.len()
    }
}

/// A value produced by a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputValue {
    /// 2-D tabular data
    Table(Table),
    /// 1-D labeled sequence
    Series(Series),
    /// A value the runtime already rendered to its repr text
    Repr { text: String },
    /// Any other JSON-representable value
    Value { value: Value },
}

impl OutputValue {
    pub fn repr_text(text: impl Into<String>) -> Self {
        Self::Repr { text: text.into() }
    }

    /// The generic text representation of this value.
    ///
    /// Never fails, whatever the shape of the data.
    pub fn repr(&self) -> String {
        match self {
            Self::Table(table) => table_repr(table),
            Self::Series(series) => series_repr(series),
            Self::Repr { text } => text.clone(),
            Self::Value { value } => value.to_string(),
        }
    }
}

impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl From<Value> for OutputValue {
    fn from(value: Value) -> Self {
        Self::Value { value }
    }
}

impl From<i64> for OutputValue {
    fn from(n: i64) -> Self {
        Self::Value { value: n.into() }
    }
}

impl From<f64> for OutputValue {
    fn from(n: f64) -> Self {
        Self::Value { value: n.into() }
    }
}

impl From<bool> for OutputValue {
    fn from(b: bool) -> Self {
        Self::Value { value: b.into() }
    }
}

impl From<Table> for OutputValue {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

impl From<Series> for OutputValue {
    fn from(series: Series) -> Self {
        Self::Series(series)
    }
}

/// Render a single cell as display text.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "NaN".into(),
        other => other.to_string(),
    }
}

fn labels_or_positions(labels: &[String], len: usize) -> Vec<String> {
    if labels.is_empty() {
        (0..len).map(|i| i.to_string()).collect()
    } else {
        labels.to_vec()
    }
}

fn table_repr(table: &Table) -> String {
    let index = table.index_labels();
    let mut grid = Vec::with_capacity(table.data.len() + 1);

    let mut header = vec![String::new()];
    header.extend(table.columns.iter().cloned());
    grid.push(header);

    for (i, row) in table.data.iter().enumerate() {
        let mut line = vec![index.get(i).cloned().unwrap_or_default()];
        line.extend(row.iter().map(cell_text));
        grid.push(line);
    }

    align_grid(&grid, 2)
}

fn series_repr(series: &Series) -> String {
    let index = series.index_labels();
    let grid: Vec<Vec<String>> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| vec![index.get(i).cloned().unwrap_or_default(), cell_text(v)])
        .collect();

    let mut out = align_grid(&grid, 4);
    if let Some(name) = &series.name {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("Name: {name}"));
    }
    out
}

/// Lay out a ragged grid: first column left-aligned, the rest right-aligned.
fn align_grid(grid: &[Vec<String>], gap: usize) -> String {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; width];
    for row in grid {
        for (c, cell) in row.iter().enumerate() {
            widths[c] = widths[c].max(cell.chars().count());
        }
    }

    let sep = " ".repeat(gap);
    grid.iter()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(c, cell)| {
                    if c == 0 {
                        format!("{cell:<w$}", w = widths[c])
                    } else {
                        format!("{cell:>w$}", w = widths[c])
                    }
                })
                .collect();
            cells.join(&sep).trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_table() -> Table {
        Table::new(
            vec!["a".into(), "b".into()],
            vec![vec![json!(1), json!(2)], vec![json!(3), json!(40)]],
        )
    }

    #[test]
    fn scalar_repr_is_json_text() {
        assert_eq!(OutputValue::from(4_i64).repr(), "4");
        assert_eq!(OutputValue::from(true).repr(), "true");
        assert_eq!(OutputValue::from(json!("hi")).repr(), "\"hi\"");
    }

    #[test]
    fn repr_text_passes_through() {
        let value = OutputValue::repr_text("<Figure size 640x480>");
        assert_eq!(value.repr(), "<Figure size 640x480>");
    }

    #[test]
    fn table_repr_aligns_columns() {
        let repr = OutputValue::from(sample_table()).repr();
        assert_eq!(repr, "   a   b\n0  1   2\n1  3  40");
    }

    #[test]
    fn series_repr_includes_name() {
        let series = Series::new(vec![json!(1.5), json!(null)]).named("price");
        let repr = OutputValue::from(series).repr();
        assert_eq!(repr, "0    1.5\n1    NaN\nName: price");
    }

    #[test]
    fn ragged_table_repr_does_not_panic() {
        let table = Table::new(
            vec!["a".into()],
            vec![vec![json!(1), json!(2), json!(3)], vec![]],
        );
        assert!(!table.is_well_formed());
        let repr = OutputValue::from(table).repr();
        assert!(repr.contains('3'));
    }

    #[test]
    fn index_labels_default_to_positions() {
        let table = sample_table();
        assert_eq!(table.index_labels(), vec!["0", "1"]);

        let labeled = sample_table().with_index(vec!["x".into(), "y".into()]);
        assert_eq!(labeled.index_labels(), vec!["x", "y"]);
    }

    #[test]
    fn tagged_json_form() {
        let value: OutputValue = serde_json::from_value(json!({
            "type": "series",
            "name": "s",
            "values": [1, 2, 3]
        }))
        .unwrap();
        assert!(matches!(value, OutputValue::Series(ref s) if s.len() == 3 && !s.is_empty()));

        let value: OutputValue =
            serde_json::from_value(json!({"type": "value", "value": 9})).unwrap();
        assert_eq!(value, OutputValue::from(9_i64));
    }

    #[test]
    fn series_without_values_is_empty() {
        let series: Series = serde_json::from_value(json!({"values": []})).unwrap();
        assert!(series.is_empty());
        assert!(series.is_well_formed());
        assert!(series.index_labels().is_empty());
    }
}
