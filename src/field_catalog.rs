//! Field names available for chart dimensions and measures.

use crate::dataset::Dataset;

/// Field names of the first record, in the record's key order. Computed once
/// when the dataset is loaded and never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCatalog {
    fields: Vec<String>,
}

impl FieldCatalog {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let fields = dataset
            .records()
            .first()
            .map(|record| record.keys().cloned().collect())
            .unwrap_or_default();
        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_come_from_first_record() {
        let ds = Dataset::from_json_str(
            r#"[{"region":"EU","sales":10},{"region":"US","sales":20,"extra":1}]"#,
        )
        .unwrap();
        let catalog = FieldCatalog::from_dataset(&ds);
        assert_eq!(catalog.fields(), ["region", "sales"]);
        assert!(catalog.contains("sales"));
        assert!(!catalog.contains("extra"));
    }

    #[test]
    fn key_order_is_preserved() {
        let ds = Dataset::from_json_str(r#"[{"zeta":1,"alpha":2,"mid":3}]"#).unwrap();
        let catalog = FieldCatalog::from_dataset(&ds);
        assert_eq!(catalog.fields(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn empty_dataset_has_no_fields() {
        let catalog = FieldCatalog::from_dataset(&Dataset::default());
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }
}
