// Logo with a right-aligned version tag

use super::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

pub const LOGO: [&str; 6] = [
    "    ██████╗ ██╗  ██╗████████╗ ██████╗ ██████╗",
    "    ██╔══██╗██║ ██╔╝╚══██╔══╝██╔═══██╗██╔══██╗",
    "    ██║  ██║█████╔╝    ██║   ██║   ██║██████╔╝",
    "    ██║  ██║██╔═██╗    ██║   ██║   ██║██╔═══╝",
    "    ██████╔╝██║  ██╗   ██║   ╚██████╔╝██║",
    "    ╚═════╝ ╚═╝  ╚═╝   ╚═╝    ╚═════╝ ╚═╝",
];

fn logo_width() -> usize {
    LOGO.iter().map(|l| l.chars().count()).max().unwrap_or(0)
}

/// Spaces between the logo's first line and the version tag for a `width`-wide terminal.
pub fn version_padding(width: usize, version_tag: &str) -> usize {
    let first = LOGO[0].chars().count();
    let wanted = width
        .saturating_sub(logo_width())
        .saturating_sub(version_tag.chars().count())
        .saturating_sub(2);
    wanted.max(1) + logo_width() - first
}

/// Logo lines with the version tag appended to the first one.
pub fn banner_lines(width: usize, version: &str) -> Vec<Line<'static>> {
    let tag = format!("v{version}");
    let logo_style = Style::default()
        .fg(Theme::CYAN)
        .add_modifier(Modifier::BOLD);
    LOGO.iter()
        .enumerate()
        .map(|(i, l)| {
            let mut spans = vec![Span::styled(*l, logo_style)];
            if i == 0 {
                spans.push(Span::raw(" ".repeat(version_padding(width, &tag))));
                spans.push(Span::styled(tag.clone(), Theme::muted()));
            }
            Line::from(spans)
        })
        .collect()
}

pub fn render(frame: &mut Frame, area: Rect, version: &str) {
    let lines = banner_lines(area.width as usize, version);
    frame.render_widget(Paragraph::new(lines), area);
}
