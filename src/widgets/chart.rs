//! Chart panel widget: one dashboard chart (line, bar, or pie) with its frame.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset as Series, GraphType,
        LegendPosition, Paragraph, Widget,
    },
};
use std::f64::consts::TAU;

use crate::chart::{ChartSpec, ChartType};
use crate::chart_data::{format_value, ChartData};
use crate::config::Theme;
use crate::dataset::Dataset;

const BAR_GAP: u16 = 1;
const MAX_BAR_WIDTH: u16 = 9;
/// Height given to the largest bar before BarChart fits it to the area.
const BAR_SCALE: f64 = 10_000.0;
/// Grid resolution used to fill pie slices on the canvas.
const PIE_STEPS: usize = 120;

const PIE_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightMagenta,
];

pub fn pie_color(i: usize) -> Color {
    PIE_COLORS[i % PIE_COLORS.len()]
}

/// A single chart with a titled border. Selected panels use the highlighted border.
pub struct ChartPanel<'a> {
    spec: &'a ChartSpec,
    data: ChartData,
    theme: &'a Theme,
    selected: bool,
    show_legend: bool,
}

impl<'a> ChartPanel<'a> {
    pub fn new(spec: &'a ChartSpec, dataset: &Dataset, theme: &'a Theme) -> Self {
        Self {
            spec,
            data: ChartData::from_spec(spec, dataset),
            theme,
            selected: false,
            show_legend: true,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn show_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }

    fn render_line(&self, area: Rect, buf: &mut Buffer) {
        let points = self.data.points();
        let x_max = self.data.values.len().saturating_sub(1).max(1) as f64;
        let [y_min, y_max] = self.data.y_bounds();
        let axis_style = Style::default().fg(self.theme.get("text_secondary"));

        let x_labels = vec![
            self.data.labels.first().cloned().unwrap_or_default(),
            self.data.labels.last().cloned().unwrap_or_default(),
        ];
        let series = Series::default()
            .name(self.spec.measure.clone())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(self.theme.get("chart_series")))
            .data(&points);

        Chart::new(vec![series])
            .x_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds([y_min, y_max])
                    .labels(vec![format_value(y_min), format_value(y_max)]),
            )
            .legend_position(if self.show_legend {
                Some(LegendPosition::TopRight)
            } else {
                None
            })
            .render(area, buf);
    }

    fn render_bar(&self, area: Rect, buf: &mut Buffer) {
        let series_color = self.theme.get("chart_series");
        // BarChart takes integer heights and multiplies them while scaling,
        // so heights are kept relative to the largest value.
        let max = self.data.max();
        let bars: Vec<Bar> = self
            .data
            .labels
            .iter()
            .zip(&self.data.values)
            .map(|(label, value)| {
                let height = if max > 0.0 {
                    (value.max(0.0) / max * BAR_SCALE).round() as u64
                } else {
                    0
                };
                Bar::default()
                    .value(height)
                    .text_value(format_value(*value))
                    .label(Line::from(label.clone()))
            })
            .collect();

        let n = bars.len().max(1);
        let gaps = (n - 1).saturating_mul(usize::from(BAR_GAP));
        let bar_width = (usize::from(area.width).saturating_sub(gaps) / n)
            .clamp(1, usize::from(MAX_BAR_WIDTH)) as u16;

        BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(BAR_GAP)
            .bar_style(Style::default().fg(series_color))
            .value_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(series_color)
                    .add_modifier(Modifier::BOLD),
            )
            .label_style(Style::default().fg(self.theme.get("text_primary")))
            .render(area, buf);
    }

    fn render_pie(&self, area: Rect, buf: &mut Buffer) {
        let shares = self.data.shares();
        if shares.is_empty() {
            Paragraph::new("No positive values")
                .centered()
                .render(area, buf);
            return;
        }

        // Terminal cells are about twice as tall as wide.
        let pie_width = (area.height.saturating_mul(2)).min(area.width * 2 / 3);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(pie_width), Constraint::Fill(1)])
            .split(area);

        let fractions: Vec<f64> = shares.iter().map(|(_, f)| *f).collect();
        let slices = pie_slices(&fractions, PIE_STEPS);
        Canvas::default()
            .x_bounds([-1.0, 1.0])
            .y_bounds([-1.0, 1.0])
            .marker(symbols::Marker::Braille)
            .paint(|ctx| {
                for (i, coords) in slices.iter().enumerate() {
                    ctx.draw(&Points {
                        coords,
                        color: pie_color(i),
                    });
                }
            })
            .render(chunks[0], buf);

        let text_color = self.theme.get("text_primary");
        let legend: Vec<Line> = shares
            .iter()
            .enumerate()
            .map(|(i, (label, fraction))| {
                Line::from(vec![
                    Span::styled("■ ", Style::default().fg(pie_color(i))),
                    Span::styled(
                        format!("{} {:.1}%", label, fraction * 100.0),
                        Style::default().fg(text_color),
                    ),
                ])
            })
            .collect();
        Paragraph::new(legend).render(chunks[1], buf);
    }
}

impl Widget for ChartPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.selected {
            self.theme.get("chart_border_selected")
        } else {
            self.theme.get("chart_border")
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(
                " {}: {} by {} ",
                self.spec.chart_type, self.spec.measure, self.spec.dimension
            ));
        if self.selected {
            block = block.title_bottom(
                Line::from(" e edit · d delete ")
                    .style(Style::default().fg(self.theme.get("secondary")))
                    .right_aligned(),
            );
        }
        let inner = block.inner(area);
        block.render(area, buf);

        if self.data.is_empty() {
            Paragraph::new("No data").centered().render(inner, buf);
            return;
        }

        match self.spec.chart_type {
            ChartType::Line => self.render_line(inner, buf),
            ChartType::Bar => self.render_bar(inner, buf),
            ChartType::Pie => self.render_pie(inner, buf),
        }
    }
}

/// Sample the unit disc on a `steps`×`steps` grid and assign each point to a
/// slice. Slices start at twelve o'clock and run clockwise in `fractions` order.
pub fn pie_slices(fractions: &[f64], steps: usize) -> Vec<Vec<(f64, f64)>> {
    let mut slices = vec![Vec::new(); fractions.len()];
    if fractions.is_empty() || steps == 0 {
        return slices;
    }

    let ends: Vec<f64> = fractions
        .iter()
        .scan(0.0, |acc, f| {
            *acc += f;
            Some(*acc)
        })
        .collect();

    for i in 0..=steps {
        for j in 0..=steps {
            let x = -1.0 + 2.0 * i as f64 / steps as f64;
            let y = -1.0 + 2.0 * j as f64 / steps as f64;
            if x * x + y * y > 1.0 {
                continue;
            }
            let turn = (x.atan2(y) / TAU).rem_euclid(1.0);
            let slice = ends
                .iter()
                .position(|end| turn < *end)
                .unwrap_or(fractions.len() - 1);
            slices[slice].push((x, y));
        }
    }
    slices
}
