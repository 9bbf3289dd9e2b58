// Key hints for the active panel

use super::Panel;
use super::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const COMMON: &[(&str, &str)] = &[("Tab", "panel"), ("j/k", "nav"), ("/", "filter"), ("q", "quit")];

/// Panel-specific bindings followed by the common ones.
pub fn key_hints(panel: Panel) -> Vec<(&'static str, &'static str)> {
    let specific: &[(&str, &str)] = match panel {
        Panel::Containers => &[
            ("s", "start"),
            ("x", "stop"),
            ("r", "restart"),
            ("d", "delete"),
            ("a", "autostart"),
            ("Enter", "logs"),
        ],
        Panel::Images => &[("p", "pull"), ("d", "delete")],
        Panel::Logs => &[("j/k", "scroll"), ("G", "bottom"), ("Esc", "back")],
        Panel::Stats => &[],
    };
    specific.iter().chain(COMMON).copied().collect()
}

/// Gap between hints so they spread across `width`; at least one space.
fn spacing(hints: &[(&str, &str)], width: usize) -> usize {
    if hints.is_empty() {
        return 1;
    }
    let total: usize = hints
        .iter()
        .map(|(k, d)| k.chars().count() + 1 + d.chars().count())
        .sum();
    if total >= width {
        return 1;
    }
    ((width - total) / hints.len()).max(1)
}

pub fn render(frame: &mut Frame, area: Rect, panel: Panel) {
    let hints = key_hints(panel);
    let gap = " ".repeat(spacing(&hints, area.width as usize));
    let key_style = Style::default()
        .fg(Theme::PINK)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(gap.clone()));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(":{desc}"), Theme::muted()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
