//! Session history: the inputs and outputs recorded by a notebook session.
//!
//! A history source exposes two index-keyed views:
//! - every raw input ever issued, keyed by a monotonically increasing index
//!   (entries may be `None` for non-code cells)
//! - a sparse map from index to the value that input produced
//!
//! An index with no entry in the output map simply produced nothing (no
//! return value, or the cell raised). The store owns index uniqueness and
//! ordering; readers here only ever read.

use crate::error::HistoryError;
use crate::value::OutputValue;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Read-only view over a session's input/output history.
pub trait HistorySource {
    /// All recorded inputs as `(index, raw text)` pairs.
    fn inputs(&self) -> Box<dyn Iterator<Item = (u64, Option<&str>)> + '_>;

    /// The value produced by the input at `index`, if any.
    fn output(&self, index: u64) -> Option<&OutputValue>;
}

/// In-memory session history backed by ordered maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionHistory {
    #[serde(default, deserialize_with = "keyed_or_positional")]
    inputs: BTreeMap<u64, Option<String>>,

    #[serde(default)]
    outputs: BTreeMap<u64, OutputValue>,
}

impl SessionHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_maps(
        inputs: BTreeMap<u64, Option<String>>,
        outputs: BTreeMap<u64, OutputValue>,
    ) -> Self {
        Self { inputs, outputs }
    }

    /// Build from a raw input list where each entry's position is its index.
    pub fn from_raw_inputs<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        Self {
            inputs: (0u64..).zip(raw).collect(),
            outputs: BTreeMap::new(),
        }
    }

    /// Record an input at `index`, replacing any previous one.
    pub fn push_input(&mut self, index: u64, text: impl Into<String>) -> &mut Self {
        self.inputs.insert(index, Some(text.into()));
        self
    }

    /// Record a non-code entry (the store keeps a slot with no text).
    pub fn push_empty(&mut self, index: u64) -> &mut Self {
        self.inputs.insert(index, None);
        self
    }

    /// Record the value produced at `index`.
    pub fn record_output(&mut self, index: u64, value: impl Into<OutputValue>) -> &mut Self {
        self.outputs.insert(index, value.into());
        self
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Parse a history from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a history from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self, HistoryError> {
        let content = std::fs::read_to_string(path).map_err(|e| HistoryError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let history = Self::from_json_str(&content).map_err(|e| HistoryError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!(
            inputs = history.input_count(),
            outputs = history.output_count(),
            path = %path.display(),
            "Loaded session history"
        );
        Ok(history)
    }
}

impl HistorySource for SessionHistory {
    fn inputs(&self) -> Box<dyn Iterator<Item = (u64, Option<&str>)> + '_> {
        Box::new(self.inputs.iter().map(|(i, text)| (*i, text.as_deref())))
    }

    fn output(&self, index: u64) -> Option<&OutputValue> {
        self.outputs.get(&index)
    }
}

/// `inputs` is either an object keyed by index or an array where each
/// element's position is its index.
fn keyed_or_positional<'de, D>(deserializer: D) -> Result<BTreeMap<u64, Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawInputs {
        Keyed(BTreeMap<String, Option<String>>),
        Positional(Vec<Option<String>>),
    }

    match RawInputs::deserialize(deserializer)? {
        RawInputs::Positional(list) => Ok((0u64..).zip(list).collect()),
        RawInputs::Keyed(map) => map
            .into_iter()
            .map(|(key, text)| {
                key.trim()
                    .parse::<u64>()
                    .map(|index| (index, text))
                    .map_err(|_| D::Error::custom(format!("invalid input index: {key:?}")))
            })
            .collect(),
    }
}
