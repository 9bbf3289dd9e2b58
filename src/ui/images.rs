// Image list

use super::cursor::FilteredList;
use super::format::{format_bytes_short, pad};
use super::panel_block;
use super::theme::Theme;
use crate::models::ImageSnapshot;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

const SIZE_WIDTH: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct ImagesPanel {
    list: FilteredList<ImageSnapshot>,
}

impl ImagesPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_items(&mut self, items: Vec<ImageSnapshot>) {
        self.list.set_items(items);
    }

    pub fn items(&self) -> &[ImageSnapshot] {
        self.list.items()
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.list.set_filter(filter);
    }

    pub fn filter(&self) -> &str {
        self.list.filter()
    }

    pub fn filtered(&self) -> Vec<&ImageSnapshot> {
        self.list.filtered()
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.list.move_selection(delta);
    }

    pub fn selected(&self) -> Option<&ImageSnapshot> {
        self.list.selected()
    }

    pub fn set_visible_rows(&mut self, rows: usize) {
        self.list.set_visible_rows(rows);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, active: bool) {
        let mut title = " Images ".to_string();
        if !self.filter().is_empty() {
            title.push_str(&format!("[{}] ", self.filter()));
        }
        let block = panel_block(title, active);
        let inner = block.inner(area);
        let tag_width = (inner.width as usize).saturating_sub(SIZE_WIDTH + 1).max(1);

        let mut lines = vec![Line::styled(
            format!(
                "{} {}",
                pad("REPOSITORY:TAG", tag_width),
                pad("SIZE", SIZE_WIDTH)
            ),
            Theme::header(),
        )];

        let filtered = self.filtered();
        if filtered.is_empty() {
            lines.push(Line::styled("No images", Theme::placeholder()));
        } else {
            let rows = (inner.height as usize).saturating_sub(1).max(1);
            let cursor = self.list.cursor();
            let start = cursor.window_start(rows);
            for (i, image) in filtered.iter().enumerate().skip(start).take(rows) {
                let style = if i == cursor.selected() {
                    Theme::selected()
                } else {
                    Style::default()
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{} ", pad(image.display_tag(), tag_width)), style),
                    Span::styled(
                        pad(&format_bytes_short(image.size_bytes), SIZE_WIDTH),
                        style.fg(Theme::GRAY),
                    ),
                ]));
            }
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
