// Prompt / error line above the help bar

use super::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// Text entry in progress, e.g. `Filter: ng`.
    Prompt { label: &'static str, buffer: String },
    Error(String),
}

impl StatusLine {
    pub fn to_line(&self) -> Line<'static> {
        match self {
            StatusLine::Prompt { label, buffer } => Line::from(vec![
                Span::styled(
                    format!("{label}: "),
                    Style::default()
                        .fg(Theme::YELLOW)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(buffer.clone()),
                Span::styled("█", Style::default().fg(Theme::WHITE)),
            ]),
            StatusLine::Error(message) => {
                Line::from(Span::styled(format!("Error: {message}"), Theme::error()))
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.to_line()), area);
    }
}
