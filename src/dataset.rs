//! The static dataset charts are drawn from.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::{Map, Value};
use std::path::Path;

/// One row of the dataset: field name to value, in file order.
pub type Record = Map<String, Value>;

const SAMPLE_DATA: &str = include_str!("../data/sample.json");

static NULL: Value = Value::Null;

/// Ordered, uniform records loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of objects.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s).map_err(|e| eyre!("Invalid JSON: {}", e))?;
        let Value::Array(items) = value else {
            return Err(eyre!("Dataset must be a JSON array of records"));
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(record) => Ok(record),
                _ => Err(eyre!("Record {} is not a JSON object", i)),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_records(records))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre!("Failed to read dataset at {}: {}", path.display(), e))?;
        let dataset = Self::from_json_str(&content)
            .map_err(|e| eyre!("Failed to load dataset at {}: {}", path.display(), e))?;
        tracing::info!(
            path = %path.display(),
            records = dataset.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// The dataset bundled with the binary.
    pub fn sample() -> Result<Self> {
        Self::from_json_str(SAMPLE_DATA)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values of `field` across all records; `Null` where a record lacks it.
    pub fn column<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.records
            .iter()
            .map(move |r| r.get(field).unwrap_or(&NULL))
    }
}
