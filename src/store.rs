//! The ordered collection of charts shown on the dashboard.

use crate::chart::{ChartKey, ChartSpec, DraftForm};
use crate::error::{ChartError, ValidationError};

/// Charts in display order. Keys come from a counter owned by the collection,
/// so a key is unique for the lifetime of the collection even after deletes.
#[derive(Debug, Default, Clone)]
pub struct ChartCollection {
    charts: Vec<ChartSpec>,
    next_key: u64,
}

impl ChartCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `draft` and append it under a fresh key. Any key already on
    /// the draft is ignored.
    pub fn add(&mut self, draft: &DraftForm) -> Result<ChartKey, ValidationError> {
        let valid = draft.validate()?;
        let key = self.issue_key();
        self.charts.push(ChartSpec {
            key,
            chart_type: valid.chart_type,
            dimension: valid.dimension,
            measure: valid.measure,
        });
        tracing::debug!(%key, chart_type = %valid.chart_type, "chart added");
        Ok(key)
    }

    /// Replace the fields of the chart with `spec.key`, keeping its position.
    pub fn update(&mut self, spec: ChartSpec) -> Result<(), ChartError> {
        let missing = spec.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::new(missing).into());
        }
        let slot = self
            .charts
            .iter_mut()
            .find(|c| c.key == spec.key)
            .ok_or(ChartError::NotFound(spec.key))?;
        tracing::debug!(key = %spec.key, chart_type = %spec.chart_type, "chart updated");
        *slot = spec;
        Ok(())
    }

    /// Remove the chart with `key`. Returns false when there was none.
    pub fn delete(&mut self, key: ChartKey) -> bool {
        let before = self.charts.len();
        self.charts.retain(|c| c.key != key);
        let removed = self.charts.len() != before;
        if removed {
            tracing::debug!(%key, "chart deleted");
        }
        removed
    }

    pub fn get(&self, key: ChartKey) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.key == key)
    }

    pub fn position(&self, key: ChartKey) -> Option<usize> {
        self.charts.iter().position(|c| c.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChartSpec> {
        self.charts.iter()
    }

    pub fn as_slice(&self) -> &[ChartSpec] {
        &self.charts
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    fn issue_key(&mut self) -> ChartKey {
        self.next_key += 1;
        ChartKey(self.next_key)
    }
}

impl<'a> IntoIterator for &'a ChartCollection {
    type Item = &'a ChartSpec;
    type IntoIter = std::slice::Iter<'a, ChartSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
