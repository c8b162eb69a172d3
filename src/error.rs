//! Errors raised by the chart collection and the chart form.

use std::fmt;

use crate::chart::ChartKey;

/// A required field of a chart draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Type,
    Dimension,
    Measure,
}

impl DraftField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Dimension => "dimension",
            Self::Measure => "measure",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A draft was confirmed without a type, dimension, or measure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Please fill all fields (missing: {})", join_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<DraftField>,
}

impl ValidationError {
    pub fn new(missing: Vec<DraftField>) -> Self {
        Self { missing }
    }
}

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Chart {0} no longer exists")]
    NotFound(ChartKey),
}
