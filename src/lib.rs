use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, StatefulWidget, Wrap};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

pub mod chart;
pub mod chart_data;
pub mod chart_modal;
pub mod config;
pub mod dataset;
pub mod error;
pub mod field_catalog;
pub mod logging;
pub mod store;
pub mod widgets;

pub use chart::{ChartKey, ChartSpec, ChartType, DraftForm};
pub use chart_modal::{ChartModal, ConfirmOutcome, EditorState, FormFocus};
pub use chartboard_cli::Args;
pub use config::{AppConfig, ConfigManager, Theme};
pub use dataset::Dataset;
pub use error::{ChartError, DraftField, ValidationError};
pub use field_catalog::FieldCatalog;
pub use store::ChartCollection;

use widgets::chart::ChartPanel;
use widgets::chart_form::ChartForm;
use widgets::controls::Controls;
use widgets::debug::DebugState;

pub const APP_NAME: &str = "chartboard";

pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16), // resized (width, height)
    Exit,
    Crash(String),
}

/// Blocking notice shown over everything else until dismissed.
#[derive(Default)]
pub struct ErrorModal {
    pub active: bool,
    pub message: String,
}

impl ErrorModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: String) {
        self.active = true;
        self.message = message;
    }

    pub fn hide(&mut self) {
        self.active = false;
        self.message.clear();
    }
}

pub struct App {
    dataset: Dataset,
    catalog: FieldCatalog,
    pub charts: ChartCollection,
    pub chart_modal: ChartModal,
    pub error_modal: ErrorModal,
    /// Index of the highlighted chart on the dashboard.
    pub selected: usize,
    scroll_row: usize,
    show_help: bool,
    debug: DebugState,
    theme: Theme,
    charts_per_row: usize,
    chart_height: u16,
    show_legend: bool,
}

impl App {
    pub fn new(dataset: Dataset) -> App {
        let config = AppConfig::default();
        let theme = Theme::from_config(&config.theme).unwrap_or_else(|e| {
            tracing::warn!("Failed to create default theme: {}. Using fallback.", e);
            Theme::default()
        });
        Self::new_with_config(dataset, theme, &config)
    }

    pub fn new_with_config(dataset: Dataset, theme: Theme, config: &AppConfig) -> App {
        let catalog = FieldCatalog::from_dataset(&dataset);
        tracing::info!(
            records = dataset.len(),
            fields = catalog.len(),
            "dashboard initialized"
        );
        App {
            dataset,
            catalog,
            charts: ChartCollection::new(),
            chart_modal: ChartModal::new(),
            error_modal: ErrorModal::new(),
            selected: 0,
            scroll_row: 0,
            show_help: false,
            debug: DebugState {
                enabled: config.debug.enabled,
                ..DebugState::default()
            },
            theme,
            charts_per_row: config.display.charts_per_row.max(1),
            chart_height: config.display.chart_height,
            show_legend: config.display.show_legend,
        }
    }

    pub fn enable_debug(&mut self) {
        self.debug.enabled = true;
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn selected_chart(&self) -> Option<&ChartSpec> {
        self.charts.as_slice().get(self.selected)
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    fn color(&self, name: &str) -> Color {
        self.theme.get(name)
    }

    pub fn event(&mut self, event: &AppEvent) -> Option<AppEvent> {
        self.debug.num_events += 1;
        match event {
            AppEvent::Key(key) => self.key(key),
            // the next draw picks up the new size
            AppEvent::Resize(_, _) => None,
            AppEvent::Exit | AppEvent::Crash(_) => None,
        }
    }

    fn key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        self.debug.on_key(event);
        if event.kind != KeyEventKind::Press {
            return None;
        }

        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppEvent::Exit);
        }

        // Notice has highest priority and swallows everything else
        if self.error_modal.active {
            if matches!(event.code, KeyCode::Esc | KeyCode::Enter) {
                self.error_modal.hide();
            }
            return None;
        }

        if self.show_help {
            if matches!(
                event.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return None;
        }

        if event.code == KeyCode::Char('?') {
            self.show_help = true;
            return None;
        }

        if self.chart_modal.is_open() {
            self.form_key(event);
            return None;
        }

        match event.code {
            KeyCode::Char('q') => return Some(AppEvent::Exit),
            KeyCode::Char('a') => {
                self.debug.action("add_chart");
                self.chart_modal.open_create(self.catalog.fields());
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(spec) = self.selected_chart().cloned() {
                    self.debug.action("edit_chart");
                    self.chart_modal.open_edit(&spec, self.catalog.fields());
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Left | KeyCode::Char('h') => self.move_selection(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-(self.charts_per_row as isize)),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(self.charts_per_row as isize),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.charts.len().saturating_sub(1),
            _ => {}
        }
        None
    }

    fn form_key(&mut self, event: &KeyEvent) {
        match event.code {
            KeyCode::Esc => {
                self.debug.action("cancel_form");
                self.chart_modal.cancel();
            }
            KeyCode::Tab => self.chart_modal.focus = self.chart_modal.focus.next(),
            KeyCode::BackTab => self.chart_modal.focus = self.chart_modal.focus.prev(),
            KeyCode::Up | KeyCode::Char('k') => self.chart_modal.move_highlight(-1),
            KeyCode::Down | KeyCode::Char('j') => self.chart_modal.move_highlight(1),
            KeyCode::PageUp => self.chart_modal.move_highlight(-10),
            KeyCode::PageDown => self.chart_modal.move_highlight(10),
            KeyCode::Enter | KeyCode::Char(' ') => match self.chart_modal.focus {
                FormFocus::Save => self.confirm_form(),
                FormFocus::Cancel => {
                    self.debug.action("cancel_form");
                    self.chart_modal.cancel();
                }
                _ => {
                    self.chart_modal.choose_highlighted();
                    // advance to the next selector after a choice
                    self.chart_modal.focus = self.chart_modal.focus.next();
                }
            },
            _ => {}
        }
    }

    fn confirm_form(&mut self) {
        self.debug.action("confirm_form");
        match self.chart_modal.confirm(&mut self.charts) {
            Ok(ConfirmOutcome::Added(key)) | Ok(ConfirmOutcome::Updated(key)) => {
                if let Some(pos) = self.charts.position(key) {
                    self.selected = pos;
                }
            }
            Err(e) => {
                self.error_modal.show(e.to_string());
                self.clamp_selection();
            }
        }
    }

    fn delete_selected(&mut self) {
        if let Some(key) = self.selected_chart().map(|c| c.key) {
            self.debug.action("delete_chart");
            self.charts.delete(key);
            self.clamp_selection();
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.charts.is_empty() {
            return;
        }
        let last = self.charts.len() as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.charts.len().saturating_sub(1));
    }

    fn render_dashboard(&mut self, area: Rect, buf: &mut Buffer) {
        if self.charts.is_empty() {
            self.render_empty(area, buf);
            return;
        }

        let per_row = self.charts_per_row;
        let total_rows = self.charts.len().div_ceil(per_row);
        let visible_rows = ((area.height / self.chart_height.max(1)) as usize).max(1);
        let selected_row = self.selected / per_row;
        if selected_row < self.scroll_row {
            self.scroll_row = selected_row;
        } else if selected_row >= self.scroll_row + visible_rows {
            self.scroll_row = selected_row + 1 - visible_rows;
        }
        self.scroll_row = self.scroll_row.min(total_rows.saturating_sub(visible_rows));

        let row_constraints: Vec<Constraint> = (0..visible_rows)
            .map(|_| Constraint::Length(self.chart_height))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(row_constraints)
            .split(area);

        for (r, row_area) in rows.iter().enumerate() {
            let row = self.scroll_row + r;
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints((0..per_row).map(|_| Constraint::Ratio(1, per_row as u32)))
                .split(*row_area);
            for (c, cell) in cells.iter().enumerate() {
                let index = row * per_row + c;
                let Some(spec) = self.charts.as_slice().get(index) else {
                    break;
                };
                ChartPanel::new(spec, &self.dataset, &self.theme)
                    .selected(index == self.selected)
                    .show_legend(self.show_legend)
                    .render(*cell, buf);
            }
        }
    }

    fn render_empty(&self, area: Rect, buf: &mut Buffer) {
        let primary = self.color("primary");
        let dimmed = self.color("text_secondary");
        let mut lines = vec![
            Line::from(vec![
                Span::raw("No charts yet. Press "),
                Span::styled("a", Style::default().fg(primary).add_modifier(Modifier::BOLD)),
                Span::raw(" to add one."),
            ]),
            Line::default(),
            Line::from(Span::styled(
                format!("{} records", self.dataset.len()),
                Style::default().fg(dimmed),
            )),
        ];
        if self.catalog.is_empty() {
            lines.push(Line::from(Span::styled(
                "The dataset has no fields to chart.",
                Style::default().fg(self.color("error")),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("Fields: {}", self.catalog.fields().join(", ")),
                Style::default().fg(dimmed),
            )));
        }

        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(lines.len() as u16),
            Constraint::Fill(1),
        ])
        .areas(area);
        Paragraph::new(lines)
            .centered()
            .wrap(Wrap { trim: true })
            .render(middle, buf);
    }

    fn render_error_modal(&self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect_with_min(area, 50, 20, 40, 7);
        Clear.render(popup, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.color("modal_border_error")))
            .title(" Notice ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let layout = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(inner);
        Paragraph::new(self.error_modal.message.as_str())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(self.color("text_primary")))
            .render(layout[0], buf);
        Paragraph::new("[ OK ]")
            .centered()
            .style(Style::default().add_modifier(Modifier::REVERSED))
            .render(layout[1], buf);
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        const HELP: [(&str, &str); 12] = [
            ("a", "Add a chart"),
            ("e / Enter", "Edit the selected chart"),
            ("d / Del", "Delete the selected chart"),
            ("←→↑↓ / hjkl", "Move the selection"),
            ("Home / End", "First / last chart"),
            ("?", "Toggle this help"),
            ("q / Ctrl-c", "Quit"),
            ("", ""),
            ("Tab / Shift-Tab", "Form: next / previous control"),
            ("↑↓ / jk", "Form: move in a list"),
            ("Enter / Space", "Form: choose, save, or close"),
            ("Esc", "Form: cancel"),
        ];

        let popup = centered_rect_with_min(area, 60, 60, 50, 16);
        Clear.render(popup, buf);
        let key_style = Style::default()
            .fg(self.color("primary"))
            .add_modifier(Modifier::BOLD);
        let lines: Vec<Line> = HELP
            .iter()
            .map(|(key, text)| {
                Line::from(vec![
                    Span::styled(format!("{:>16}  ", key), key_style),
                    Span::raw(*text),
                ])
            })
            .collect();
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.color("modal_border")))
                    .title(" Help "),
            )
            .render(popup, buf);
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.debug.num_frames += 1;

        Block::default()
            .style(Style::default().bg(self.color("background")))
            .render(area, buf);

        let mut constraints = vec![Constraint::Fill(1), Constraint::Length(1)];
        if self.debug.enabled {
            constraints.push(Constraint::Length(1));
        }
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        self.render_dashboard(layout[0], buf);

        if self.chart_modal.is_open() {
            let popup = centered_rect_with_min(layout[0], 80, 70, 60, 12);
            ChartForm::new(&self.theme).render(popup, buf, &mut self.chart_modal);
        }

        let overlay_active = self.error_modal.active || self.show_help;
        let controls = Controls::new()
            .with_chart_count(self.charts.len())
            .with_form_active(self.chart_modal.is_open())
            .with_dimmed(overlay_active)
            .with_colors(self.color("controls_bg"), self.color("primary"))
            .with_dimmed_color(self.color("dimmed"));
        controls.render(layout[1], buf);

        if self.debug.enabled {
            self.debug.editor_state = format!("{:?}", self.chart_modal.state);
            self.debug.render(layout[2], buf);
        }

        if self.show_help {
            self.render_help(area, buf);
        }
        if self.error_modal.active {
            self.render_error_modal(area, buf);
        }
    }
}

/// Centered popup of the given percentage size, grown to at least
/// `min_width`×`min_height` where the area allows.
fn centered_rect_with_min(
    r: Rect,
    percent_x: u16,
    percent_y: u16,
    min_width: u16,
    min_height: u16,
) -> Rect {
    let scaled = |len: u16, percent: u16| (u32::from(len) * u32::from(percent) / 100) as u16;
    let width = scaled(r.width, percent_x).max(min_width).min(r.width);
    let height = scaled(r.height, percent_y).max(min_height).min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_respects_minimum_and_bounds() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect_with_min(area, 50, 20, 60, 10);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 10);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 15);

        let small = Rect::new(0, 0, 30, 5);
        let popup = centered_rect_with_min(small, 50, 50, 60, 10);
        assert_eq!(popup, small);
    }

    #[test]
    fn error_modal_show_and_hide() {
        let mut modal = ErrorModal::new();
        modal.show("Please fill all fields".to_string());
        assert!(modal.active);
        modal.hide();
        assert!(!modal.active);
        assert!(modal.message.is_empty());
    }
}
