use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Widget},
};

const DASHBOARD_CONTROLS: [(&str, &str); 6] = [
    ("a", "Add"),
    ("e", "Edit"),
    ("d", "Delete"),
    ("←→", "Select"),
    ("?", "Help"),
    ("q", "Quit"),
];

const FORM_CONTROLS: [(&str, &str); 5] = [
    ("Tab", "Next"),
    ("↑↓", "Move"),
    ("Enter", "Choose"),
    ("Esc", "Cancel"),
    ("?", "Help"),
];

/// Key hints along the bottom of the screen.
pub struct Controls {
    pub chart_count: Option<usize>,
    pub dimmed: bool,
    pub form_active: bool,
    pub bg_color: Color,
    pub key_color: Color,
    pub dimmed_color: Color,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            chart_count: None,
            dimmed: false,
            form_active: false,
            bg_color: Color::DarkGray,
            key_color: Color::Reset,
            dimmed_color: Color::DarkGray,
        }
    }
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chart_count(mut self, chart_count: usize) -> Self {
        self.chart_count = Some(chart_count);
        self
    }

    pub fn with_dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    pub fn with_form_active(mut self, form_active: bool) -> Self {
        self.form_active = form_active;
        self
    }

    pub fn with_colors(mut self, bg_color: Color, key_color: Color) -> Self {
        self.bg_color = bg_color;
        self.key_color = key_color;
        self
    }

    pub fn with_dimmed_color(mut self, dimmed_color: Color) -> Self {
        self.dimmed_color = dimmed_color;
        self
    }
}

impl Widget for &Controls {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let controls: &[(&str, &str)] = if self.form_active {
            &FORM_CONTROLS
        } else {
            &DASHBOARD_CONTROLS
        };

        let mut constraints = controls.iter().fold(vec![], |mut acc, (key, action)| {
            acc.push(Constraint::Length(key.chars().count() as u16 + 2));
            acc.push(Constraint::Length(action.chars().count() as u16 + 1));
            acc
        });
        if self.chart_count.is_some() {
            constraints.push(Constraint::Length(12)); // "Charts: 123"
        }
        constraints.push(Constraint::Fill(1));

        let layout = Layout::new(Direction::Horizontal, constraints).split(area);

        let base_style = if self.dimmed {
            Style::default().fg(self.dimmed_color)
        } else {
            Style::default()
        };

        let key_style = if self.dimmed {
            base_style
        } else {
            base_style.fg(self.key_color)
        };

        for (i, (key, action)) in controls.iter().enumerate() {
            let j = i * 2;
            Paragraph::new(*key)
                .style(key_style.add_modifier(Modifier::BOLD))
                .centered()
                .render(layout[j], buf);
            Paragraph::new(*action)
                .style(base_style.bg(self.bg_color))
                .render(layout[j + 1], buf);
        }

        let mut fill_start_idx = controls.len() * 2;
        if let Some(count) = self.chart_count {
            Paragraph::new(format!("Charts: {}", count))
                .style(base_style.bg(self.bg_color))
                .right_aligned()
                .render(layout[fill_start_idx], buf);
            fill_start_idx += 1;
        }

        Paragraph::new("")
            .style(base_style.bg(self.bg_color))
            .render(layout[fill_start_idx], buf);
    }
}
