//! Chart form widget: chart type, dimension and measure selectors with buttons.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::chart::ChartType;
use crate::chart_modal::{ChartModal, FormFocus};
use crate::config::Theme;

pub struct ChartForm<'a> {
    theme: &'a Theme,
}

impl<'a> ChartForm<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

struct Selector<'s> {
    placeholder: &'s str,
    items: Vec<String>,
    current: Option<String>,
    focused: bool,
}

impl ChartForm<'_> {
    fn render_selector(
        &self,
        selector: Selector<'_>,
        area: Rect,
        buf: &mut Buffer,
        list_state: &mut ListState,
    ) {
        let border_color = if selector.focused {
            self.theme.get("modal_border_active")
        } else {
            self.theme.get("modal_border")
        };
        let title = selector
            .current
            .clone()
            .unwrap_or_else(|| selector.placeholder.to_string());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title);

        let active_color = self.theme.get("modal_border_active");
        let text_primary = self.theme.get("text_primary");
        let items: Vec<ListItem> = selector
            .items
            .iter()
            .map(|name| {
                let chosen = selector.current.as_deref() == Some(name.as_str());
                let (marker, style) = if chosen {
                    ("● ", Style::default().fg(active_color))
                } else {
                    ("  ", Style::default().fg(text_primary))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(name.as_str(), style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(if selector.focused {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            });
        StatefulWidget::render(list, area, buf, list_state);
    }

    fn render_buttons(&self, modal: &ChartModal, area: Rect, buf: &mut Buffer) {
        let button = |label: &str, focused: bool, color: Color| {
            let style = if focused {
                Style::default()
                    .fg(color)
                    .add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };
            Span::styled(format!("[ {} ]", label), style)
        };

        Paragraph::new(Line::from(vec![
            button(
                modal.submit_label(),
                modal.focus == FormFocus::Save,
                self.theme.get("primary"),
            ),
            Span::raw("   "),
            button(
                "Close",
                modal.focus == FormFocus::Cancel,
                self.theme.get("text_primary"),
            ),
        ]))
        .centered()
        .render(area, buf);
    }
}

impl StatefulWidget for ChartForm<'_> {
    type State = ChartModal;

    fn render(self, area: Rect, buf: &mut Buffer, modal: &mut ChartModal) {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.get("modal_border")))
            .title(format!(" {} ", modal.title()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),   // Selectors
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Buttons
            ])
            .split(inner);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[0]);

        let type_selector = Selector {
            placeholder: "Select chart type",
            items: ChartType::ALL.iter().map(|t| t.to_string()).collect(),
            current: modal.draft.chart_type.map(|t| t.to_string()),
            focused: modal.focus == FormFocus::ChartType,
        };
        let dimension_selector = Selector {
            placeholder: "Select dimension",
            items: modal.fields.clone(),
            current: modal.draft.dimension.clone(),
            focused: modal.focus == FormFocus::Dimension,
        };
        let measure_selector = Selector {
            placeholder: "Select measure",
            items: modal.fields.clone(),
            current: modal.draft.measure.clone(),
            focused: modal.focus == FormFocus::Measure,
        };

        self.render_selector(type_selector, columns[0], buf, &mut modal.type_list_state);
        self.render_selector(
            dimension_selector,
            columns[1],
            buf,
            &mut modal.dimension_list_state,
        );
        self.render_selector(
            measure_selector,
            columns[2],
            buf,
            &mut modal.measure_list_state,
        );
        self.render_buttons(modal, rows[2], buf);
    }
}
