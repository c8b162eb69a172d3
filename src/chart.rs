//! Chart definitions: type, key, the stored spec, and the editable draft.

use std::fmt;
use std::str::FromStr;

use crate::error::{DraftField, ValidationError};

/// Chart type: Line, Bar, or Pie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartType {
    Line,
    Bar,
    Pie,
}

impl ChartType {
    pub const ALL: [Self; 3] = [Self::Line, Self::Bar, Self::Pie];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Bar => "Bar",
            Self::Pie => "Pie",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = String;

    /// Case-insensitive, so "bar", "Bar" and "BAR" all resolve to `Bar`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            "pie" => Ok(Self::Pie),
            other => Err(format!(
                "Unknown chart type: '{}'. Expected line, bar, or pie",
                other
            )),
        }
    }
}

/// Identifier of a chart within a collection. Issued by
/// [`ChartCollection`](crate::store::ChartCollection) and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartKey(pub(crate) u64);

impl fmt::Display for ChartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A chart as stored in the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub key: ChartKey,
    pub chart_type: ChartType,
    /// Field used as the categorical axis.
    pub dimension: String,
    /// Field used as the measured value.
    pub measure: String,
}

impl ChartSpec {
    /// Fields that would fail validation (empty dimension or measure).
    pub fn missing_fields(&self) -> Vec<DraftField> {
        let mut missing = Vec::new();
        if self.dimension.is_empty() {
            missing.push(DraftField::Dimension);
        }
        if self.measure.is_empty() {
            missing.push(DraftField::Measure);
        }
        missing
    }
}

/// Working copy of a chart while the form is open. Any field may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftForm {
    /// Set when editing an existing chart.
    pub key: Option<ChartKey>,
    pub chart_type: Option<ChartType>,
    pub dimension: Option<String>,
    pub measure: Option<String>,
}

/// The three required fields of a draft once validation has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub chart_type: ChartType,
    pub dimension: String,
    pub measure: String,
}

impl DraftForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = Some(chart_type);
        self
    }

    pub fn with_dimension(mut self, dimension: impl Into<String>) -> Self {
        self.dimension = Some(dimension.into());
        self
    }

    pub fn with_measure(mut self, measure: impl Into<String>) -> Self {
        self.measure = Some(measure.into());
        self
    }

    /// Check that type, dimension and measure are all present and non-empty.
    pub fn validate(&self) -> Result<ValidDraft, ValidationError> {
        let dimension = self.dimension.as_deref().filter(|d| !d.is_empty());
        let measure = self.measure.as_deref().filter(|m| !m.is_empty());

        match (self.chart_type, dimension, measure) {
            (Some(chart_type), Some(dimension), Some(measure)) => Ok(ValidDraft {
                chart_type,
                dimension: dimension.to_string(),
                measure: measure.to_string(),
            }),
            (chart_type, dimension, measure) => {
                let mut missing = Vec::new();
                if chart_type.is_none() {
                    missing.push(DraftField::Type);
                }
                if dimension.is_none() {
                    missing.push(DraftField::Dimension);
                }
                if measure.is_none() {
                    missing.push(DraftField::Measure);
                }
                Err(ValidationError::new(missing))
            }
        }
    }
}

impl From<&ChartSpec> for DraftForm {
    fn from(spec: &ChartSpec) -> Self {
        Self {
            key: Some(spec.key),
            chart_type: Some(spec.chart_type),
            dimension: Some(spec.dimension.clone()),
            measure: Some(spec.measure.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_type_parses_case_insensitively() {
        assert_eq!("bar".parse::<ChartType>(), Ok(ChartType::Bar));
        assert_eq!("LINE".parse::<ChartType>(), Ok(ChartType::Line));
        assert_eq!(" Pie ".parse::<ChartType>(), Ok(ChartType::Pie));
        assert!("doughnut".parse::<ChartType>().is_err());
    }

    #[test]
    fn chart_type_display_matches_as_str() {
        for t in ChartType::ALL {
            assert_eq!(t.to_string(), t.as_str());
        }
    }

    #[test]
    fn complete_draft_validates() {
        let draft = DraftForm::new()
            .with_type(ChartType::Bar)
            .with_dimension("region")
            .with_measure("sales");
        let valid = draft.validate().unwrap();
        assert_eq!(valid.chart_type, ChartType::Bar);
        assert_eq!(valid.dimension, "region");
        assert_eq!(valid.measure, "sales");
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let draft = DraftForm::new()
            .with_type(ChartType::Bar)
            .with_dimension("region")
            .with_measure("");
        let err = draft.validate().unwrap_err();
        assert_eq!(err.missing, vec![DraftField::Measure]);
    }

    #[test]
    fn empty_draft_reports_every_field() {
        let err = DraftForm::new().validate().unwrap_err();
        assert_eq!(
            err.missing,
            vec![DraftField::Type, DraftField::Dimension, DraftField::Measure]
        );
    }

    #[test]
    fn draft_from_spec_keeps_key() {
        let spec = ChartSpec {
            key: ChartKey(7),
            chart_type: ChartType::Pie,
            dimension: "region".to_string(),
            measure: "sales".to_string(),
        };
        let draft = DraftForm::from(&spec);
        assert_eq!(draft.key, Some(ChartKey(7)));
        assert_eq!(draft.chart_type, Some(ChartType::Pie));
        assert!(!draft.is_empty());
    }
}
