//! Chart form state: the draft being created or edited, and selector focus.

use ratatui::widgets::ListState;

use crate::chart::{ChartKey, ChartSpec, ChartType, DraftForm};
use crate::error::ChartError;
use crate::store::ChartCollection;

/// Whether the form is shown, and for which purpose.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    Creating,
    Editing(ChartKey),
}

/// Focus area in the chart form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    #[default]
    ChartType,
    Dimension,
    Measure,
    Save,
    Cancel,
}

impl FormFocus {
    const ORDER: [Self; 5] = [
        Self::ChartType,
        Self::Dimension,
        Self::Measure,
        Self::Save,
        Self::Cancel,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// What a successful confirm did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Added(ChartKey),
    Updated(ChartKey),
}

/// Chart form modal: editor state, draft, and one highlight per selector.
#[derive(Debug, Default)]
pub struct ChartModal {
    pub state: EditorState,
    pub draft: DraftForm,
    pub focus: FormFocus,
    /// Field names offered for dimension and measure (copied from the catalog on open).
    pub fields: Vec<String>,
    pub type_list_state: ListState,
    pub dimension_list_state: ListState,
    pub measure_list_state: ListState,
}

impl ChartModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.state != EditorState::Closed
    }

    /// Open with an empty draft for a new chart.
    pub fn open_create(&mut self, fields: &[String]) {
        self.state = EditorState::Creating;
        self.draft = DraftForm::new();
        self.reset_selectors(fields);
        tracing::debug!("chart form opened for create");
    }

    /// Open with a copy of `spec`. The highlights start on its current values.
    pub fn open_edit(&mut self, spec: &ChartSpec, fields: &[String]) {
        self.state = EditorState::Editing(spec.key);
        self.draft = DraftForm::from(spec);
        self.reset_selectors(fields);
        self.type_list_state
            .select(ChartType::ALL.iter().position(|t| *t == spec.chart_type));
        if let Some(i) = self.fields.iter().position(|f| *f == spec.dimension) {
            self.dimension_list_state.select(Some(i));
        }
        if let Some(i) = self.fields.iter().position(|f| *f == spec.measure) {
            self.measure_list_state.select(Some(i));
        }
        tracing::debug!(key = %spec.key, "chart form opened for edit");
    }

    pub fn select_type(&mut self, chart_type: ChartType) {
        if self.is_open() {
            self.draft.chart_type = Some(chart_type);
        }
    }

    pub fn select_dimension(&mut self, dimension: impl Into<String>) {
        if self.is_open() {
            self.draft.dimension = Some(dimension.into());
        }
    }

    pub fn select_measure(&mut self, measure: impl Into<String>) {
        if self.is_open() {
            self.draft.measure = Some(measure.into());
        }
    }

    /// Close without touching the collection.
    pub fn cancel(&mut self) {
        if self.is_open() {
            tracing::debug!("chart form cancelled");
        }
        self.close();
    }

    /// Validate the draft and apply it: `add` without a key, `update` with one.
    ///
    /// On a validation error the form stays open with the draft intact. If
    /// the chart being edited is gone the form closes and `NotFound` is
    /// returned.
    pub fn confirm(&mut self, charts: &mut ChartCollection) -> Result<ConfirmOutcome, ChartError> {
        let valid = self.draft.validate().inspect_err(|e| {
            tracing::info!(error = %e, "chart form rejected");
        })?;

        let outcome = match self.draft.key {
            None => ConfirmOutcome::Added(charts.add(&self.draft)?),
            Some(key) => {
                let result = charts.update(ChartSpec {
                    key,
                    chart_type: valid.chart_type,
                    dimension: valid.dimension,
                    measure: valid.measure,
                });
                if let Err(e) = result {
                    tracing::warn!(%key, error = %e, "chart form update failed");
                    self.close();
                    return Err(e);
                }
                ConfirmOutcome::Updated(key)
            }
        };

        self.close();
        Ok(outcome)
    }

    /// Move the highlight in the focused selector by `delta`, clamped to the list.
    pub fn move_highlight(&mut self, delta: isize) {
        let len = self.focused_len();
        let Some(state) = self.focused_list_state_mut() else {
            return;
        };
        if len == 0 {
            state.select(None);
            return;
        }
        let current = state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        state.select(Some(next));
    }

    /// Put the highlighted option of the focused selector into the draft.
    pub fn choose_highlighted(&mut self) {
        match self.focus {
            FormFocus::ChartType => {
                if let Some(t) = self
                    .type_list_state
                    .selected()
                    .and_then(|i| ChartType::ALL.get(i).copied())
                {
                    self.select_type(t);
                }
            }
            FormFocus::Dimension => {
                if let Some(f) = self
                    .dimension_list_state
                    .selected()
                    .and_then(|i| self.fields.get(i).cloned())
                {
                    self.select_dimension(f);
                }
            }
            FormFocus::Measure => {
                if let Some(f) = self
                    .measure_list_state
                    .selected()
                    .and_then(|i| self.fields.get(i).cloned())
                {
                    self.select_measure(f);
                }
            }
            FormFocus::Save | FormFocus::Cancel => {}
        }
    }

    pub fn title(&self) -> &'static str {
        match self.state {
            EditorState::Editing(_) => "Edit chart",
            _ => "Add new chart",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.state {
            EditorState::Editing(_) => "Save",
            _ => "Add",
        }
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            FormFocus::ChartType => ChartType::ALL.len(),
            FormFocus::Dimension | FormFocus::Measure => self.fields.len(),
            FormFocus::Save | FormFocus::Cancel => 0,
        }
    }

    fn focused_list_state_mut(&mut self) -> Option<&mut ListState> {
        match self.focus {
            FormFocus::ChartType => Some(&mut self.type_list_state),
            FormFocus::Dimension => Some(&mut self.dimension_list_state),
            FormFocus::Measure => Some(&mut self.measure_list_state),
            FormFocus::Save | FormFocus::Cancel => None,
        }
    }

    fn reset_selectors(&mut self, fields: &[String]) {
        self.fields = fields.to_vec();
        self.focus = FormFocus::ChartType;
        let first = if self.fields.is_empty() { None } else { Some(0) };
        self.type_list_state.select(Some(0));
        self.dimension_list_state.select(first);
        self.measure_list_state.select(first);
    }

    fn close(&mut self) {
        self.state = EditorState::Closed;
        self.draft = DraftForm::new();
        self.focus = FormFocus::ChartType;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<String> {
        vec!["region".to_string(), "sales".to_string()]
    }

    #[test]
    fn open_create_starts_empty() {
        let mut modal = ChartModal::new();
        assert!(!modal.is_open());
        modal.open_create(&fields());
        assert_eq!(modal.state, EditorState::Creating);
        assert!(modal.draft.is_empty());
        assert_eq!(modal.focus, FormFocus::ChartType);
        assert_eq!(modal.dimension_list_state.selected(), Some(0));
    }

    #[test]
    fn selections_update_one_field_each() {
        let mut modal = ChartModal::new();
        modal.open_create(&fields());
        modal.select_type(ChartType::Bar);
        modal.select_dimension("region");
        assert_eq!(modal.draft.chart_type, Some(ChartType::Bar));
        assert_eq!(modal.draft.dimension.as_deref(), Some("region"));
        assert_eq!(modal.draft.measure, None);
        modal.select_measure("sales");
        assert_eq!(modal.draft.chart_type, Some(ChartType::Bar));
        assert!(modal.is_open());
    }

    #[test]
    fn selections_ignored_when_closed() {
        let mut modal = ChartModal::new();
        modal.select_type(ChartType::Pie);
        assert!(modal.draft.is_empty());
    }

    #[test]
    fn confirm_adds_and_closes() {
        let mut charts = ChartCollection::new();
        let mut modal = ChartModal::new();
        modal.open_create(&fields());
        modal.select_type(ChartType::Bar);
        modal.select_dimension("region");
        modal.select_measure("sales");

        let outcome = modal.confirm(&mut charts).unwrap();
        let ConfirmOutcome::Added(key) = outcome else {
            panic!("expected add, got {:?}", outcome);
        };
        assert_eq!(charts.len(), 1);
        assert_eq!(charts.as_slice()[0].key, key);
        assert!(!modal.is_open());
        assert!(modal.draft.is_empty());
    }

    #[test]
    fn confirm_with_missing_field_stays_open() {
        let mut charts = ChartCollection::new();
        let mut modal = ChartModal::new();
        modal.open_create(&fields());
        modal.select_type(ChartType::Bar);
        modal.select_dimension("region");
        modal.select_measure("");

        let err = modal.confirm(&mut charts).unwrap_err();
        assert!(matches!(err, ChartError::Validation(_)));
        assert!(charts.is_empty());
        assert_eq!(modal.state, EditorState::Creating);
        assert_eq!(modal.draft.dimension.as_deref(), Some("region"));
    }

    #[test]
    fn edit_updates_in_place() {
        let mut charts = ChartCollection::new();
        let key = charts
            .add(
                &DraftForm::new()
                    .with_type(ChartType::Bar)
                    .with_dimension("region")
                    .with_measure("sales"),
            )
            .unwrap();

        let mut modal = ChartModal::new();
        let spec = charts.get(key).unwrap().clone();
        modal.open_edit(&spec, &fields());
        assert_eq!(modal.state, EditorState::Editing(key));
        assert_eq!(modal.draft.key, Some(key));
        assert_eq!(modal.type_list_state.selected(), Some(1));
        assert_eq!(modal.measure_list_state.selected(), Some(1));

        modal.select_type(ChartType::Line);
        assert_eq!(
            modal.confirm(&mut charts).unwrap(),
            ConfirmOutcome::Updated(key)
        );
        assert_eq!(charts.len(), 1);
        assert_eq!(charts.get(key).unwrap().chart_type, ChartType::Line);
    }

    #[test]
    fn edit_of_deleted_chart_closes_with_not_found() {
        let mut charts = ChartCollection::new();
        let key = charts
            .add(
                &DraftForm::new()
                    .with_type(ChartType::Pie)
                    .with_dimension("region")
                    .with_measure("sales"),
            )
            .unwrap();
        let spec = charts.get(key).unwrap().clone();
        let mut modal = ChartModal::new();
        modal.open_edit(&spec, &fields());
        charts.delete(key);

        assert_eq!(
            modal.confirm(&mut charts).unwrap_err(),
            ChartError::NotFound(key)
        );
        assert!(!modal.is_open());
        assert!(charts.is_empty());
    }

    #[test]
    fn cancel_discards_draft() {
        let mut charts = ChartCollection::new();
        let mut modal = ChartModal::new();
        modal.open_create(&fields());
        modal.select_type(ChartType::Bar);
        modal.cancel();
        assert!(!modal.is_open());
        assert!(modal.draft.is_empty());
        assert!(charts.is_empty());
        // a later confirm on the closed form has nothing to apply
        assert!(modal.confirm(&mut charts).is_err());
        assert!(charts.is_empty());
    }

    #[test]
    fn keyboard_selection_through_highlights() {
        let mut modal = ChartModal::new();
        modal.open_create(&fields());

        modal.move_highlight(2);
        modal.choose_highlighted();
        assert_eq!(modal.draft.chart_type, Some(ChartType::Pie));

        modal.focus = modal.focus.next();
        modal.move_highlight(5);
        assert_eq!(modal.dimension_list_state.selected(), Some(1));
        modal.move_highlight(-1);
        modal.choose_highlighted();
        assert_eq!(modal.draft.dimension.as_deref(), Some("region"));
    }

    #[test]
    fn focus_cycles() {
        assert_eq!(FormFocus::Cancel.next(), FormFocus::ChartType);
        assert_eq!(FormFocus::ChartType.prev(), FormFocus::Cancel);
        assert_eq!(FormFocus::Dimension.next(), FormFocus::Measure);
    }

    #[test]
    fn no_fields_leaves_selectors_empty() {
        let mut modal = ChartModal::new();
        modal.open_create(&[]);
        modal.focus = FormFocus::Dimension;
        modal.move_highlight(1);
        modal.choose_highlighted();
        assert_eq!(modal.dimension_list_state.selected(), None);
        assert_eq!(modal.draft.dimension, None);
    }
}
