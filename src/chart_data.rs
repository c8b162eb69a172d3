//! Chart data: the labels and values a chart plots, taken from the dataset.

use serde_json::Value;

use crate::chart::ChartSpec;
use crate::dataset::Dataset;

/// One label and one value per record, in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    pub fn from_spec(spec: &ChartSpec, dataset: &Dataset) -> Self {
        Self {
            labels: dataset.column(&spec.dimension).map(value_label).collect(),
            values: dataset.column(&spec.measure).map(value_as_f64).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (index, value) pairs for line plots.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }

    /// Y range for axes. Always includes zero and is never degenerate.
    pub fn y_bounds(&self) -> [f64; 2] {
        let (min, max) = self
            .values
            .iter()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
        if max > min {
            [min, max]
        } else {
            [min, min + 1.0]
        }
    }

    /// Largest value, or zero when every value is zero or negative.
    pub fn max(&self) -> f64 {
        self.values.iter().fold(0.0_f64, |hi, v| hi.max(*v))
    }

    /// Sum of the non-negative values.
    pub fn total(&self) -> f64 {
        self.values.iter().filter(|v| **v > 0.0).sum()
    }

    /// Each label's fraction of [`total`](Self::total). Negative values count as zero.
    pub fn shares(&self) -> Vec<(String, f64)> {
        let total = self.total();
        // a sum of huge values can still overflow to infinity
        if total <= 0.0 || !total.is_finite() {
            return Vec::new();
        }
        self.labels
            .iter()
            .zip(&self.values)
            .map(|(label, v)| (label.clone(), v.max(0.0) / total))
            .collect()
    }
}

/// Display text for a dimension value.
pub fn value_label(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numeric reading of a measure value. Non-numeric and non-finite values plot as zero.
pub fn value_as_f64(value: &Value) -> f64 {
    let v = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    v.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Compact axis/bar label for a value (integers without a fraction).
pub fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else if v.abs() >= 100.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartKey, ChartType};
    use serde_json::json;

    fn spec(dimension: &str, measure: &str) -> ChartSpec {
        ChartSpec {
            key: ChartKey(1),
            chart_type: ChartType::Bar,
            dimension: dimension.to_string(),
            measure: measure.to_string(),
        }
    }

    #[test]
    fn projects_labels_and_values() {
        let ds = Dataset::from_json_str(
            r#"[{"region":"EU","sales":10},{"region":"US","sales":"20.5"},{"region":3,"sales":null}]"#,
        )
        .unwrap();
        let data = ChartData::from_spec(&spec("region", "sales"), &ds);
        assert_eq!(data.labels, vec!["EU", "US", "3"]);
        assert_eq!(data.values, vec![10.0, 20.5, 0.0]);
    }

    #[test]
    fn missing_fields_project_to_empty_label_and_zero() {
        let ds = Dataset::from_json_str(r#"[{"a":1}]"#).unwrap();
        let data = ChartData::from_spec(&spec("nope", "also_nope"), &ds);
        assert_eq!(data.labels, vec![String::new()]);
        assert_eq!(data.values, vec![0.0]);
    }

    #[test]
    fn coercions() {
        assert_eq!(value_as_f64(&json!(true)), 1.0);
        assert_eq!(value_as_f64(&json!(false)), 0.0);
        assert_eq!(value_as_f64(&json!(" 4 ")), 4.0);
        assert_eq!(value_as_f64(&json!("n/a")), 0.0);
        assert_eq!(value_as_f64(&json!([1, 2])), 0.0);
        assert_eq!(value_label(&json!(1.5)), "1.5");
        assert_eq!(value_label(&json!(true)), "true");
    }

    #[test]
    fn non_finite_measures_plot_as_zero() {
        assert_eq!(value_as_f64(&json!("1e999")), 0.0);
        assert_eq!(value_as_f64(&json!("NaN")), 0.0);
        assert_eq!(value_as_f64(&json!("-inf")), 0.0);
        assert_eq!(value_as_f64(&json!(1e17)), 1e17);

        let ds = Dataset::from_json_str(
            r#"[{"region":"EU","sales":"1e999"},{"region":"US","sales":"NaN"},{"region":"APAC","sales":1e17}]"#,
        )
        .unwrap();
        let data = ChartData::from_spec(&spec("region", "sales"), &ds);
        assert_eq!(data.values, vec![0.0, 0.0, 1e17]);
        assert_eq!(data.y_bounds(), [0.0, 1e17]);
        assert!(data.shares().iter().all(|(_, f)| f.is_finite()));
    }

    #[test]
    fn shares_empty_when_total_overflows() {
        let data = ChartData {
            labels: vec!["a".into(), "b".into()],
            values: vec![f64::MAX, f64::MAX],
        };
        assert!(data.total().is_infinite());
        assert!(data.shares().is_empty());
    }

    #[test]
    fn y_bounds_start_at_zero() {
        let data = ChartData {
            labels: vec!["a".into(), "b".into()],
            values: vec![5.0, 20.0],
        };
        assert_eq!(data.y_bounds(), [0.0, 20.0]);

        let negative = ChartData {
            labels: vec!["a".into()],
            values: vec![-3.0],
        };
        assert_eq!(negative.y_bounds(), [-3.0, 0.0]);

        assert_eq!(ChartData::default().y_bounds(), [0.0, 1.0]);
    }

    #[test]
    fn shares_ignore_negative_values() {
        let data = ChartData {
            labels: vec!["a".into(), "b".into(), "c".into()],
            values: vec![30.0, 10.0, -5.0],
        };
        assert_eq!(data.total(), 40.0);
        let shares = data.shares();
        assert_eq!(shares[0], ("a".to_string(), 0.75));
        assert_eq!(shares[1], ("b".to_string(), 0.25));
        assert_eq!(shares[2], ("c".to_string(), 0.0));
    }

    #[test]
    fn shares_empty_when_total_is_zero() {
        let data = ChartData {
            labels: vec!["a".into()],
            values: vec![0.0],
        };
        assert!(data.shares().is_empty());
    }

    #[test]
    fn format_value_compacts_integers() {
        assert_eq!(format_value(20.0), "20");
        assert_eq!(format_value(2.5), "2.50");
        assert_eq!(format_value(1234.56), "1235");
    }
}
