// Log viewer for the selected container

use super::format::truncate;
use super::panel_block;
use super::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

pub const MAX_LOG_LINES: usize = 1000;

/// Holds at most [`MAX_LOG_LINES`] lines. While auto-scroll is on, every
/// update pins the view to the last line. Scrolling up turns it off; reaching
/// the last line again (or `G`) turns it back on.
#[derive(Debug, Clone)]
pub struct LogsPanel {
    container_id: Option<String>,
    container_name: String,
    lines: Vec<String>,
    offset: usize,
    auto_scroll: bool,
    visible_rows: usize,
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self {
            container_id: None,
            container_name: String::new(),
            lines: Vec::new(),
            offset: 0,
            auto_scroll: true,
            visible_rows: 1,
        }
    }
}

impl LogsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the viewer at a container; switching containers drops the buffer.
    pub fn set_container(&mut self, id: &str, name: &str) {
        if self.container_id.as_deref() != Some(id) {
            self.container_id = Some(id.to_string());
            self.lines.clear();
            self.offset = 0;
            self.auto_scroll = true;
        }
        self.container_name = name.to_string();
    }

    pub fn container_id(&self) -> Option<&str> {
        self.container_id.as_deref()
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    /// Replace the buffer with the latest fetch, keeping only the newest lines.
    pub fn set_lines(&mut self, mut lines: Vec<String>) {
        if lines.len() > MAX_LOG_LINES {
            lines.drain(..lines.len() - MAX_LOG_LINES);
        }
        self.lines = lines;
        self.settle();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows.max(1);
        self.settle();
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.visible_rows)
    }

    fn settle(&mut self) {
        if self.auto_scroll {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    pub fn scroll_up(&mut self) {
        self.auto_scroll = false;
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max = self.max_offset();
        self.offset = (self.offset + 1).min(max);
        if self.offset >= max {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_scroll = true;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, active: bool) {
        let mut title = vec![Span::styled(" Logs ", Theme::title(active))];
        if !self.container_name.is_empty() {
            title.push(Span::styled(
                format!("[{}] ", self.container_name),
                Theme::muted(),
            ));
        }
        if !self.auto_scroll {
            title.push(Span::styled(
                "(scroll locked - press G to unlock) ",
                Theme::muted(),
            ));
        }
        let block = panel_block(Line::from(title), active);
        let inner = block.inner(area);

        let body: Vec<Line> = if self.container_id.is_none() {
            vec![Line::styled(
                "Select a container to view logs",
                Theme::placeholder(),
            )]
        } else if self.lines.is_empty() {
            vec![Line::styled("No logs available", Theme::placeholder())]
        } else {
            let rows = inner.height.max(1) as usize;
            let width = inner.width as usize;
            let start = self.offset.min(self.lines.len());
            self.lines[start..]
                .iter()
                .take(rows)
                .map(|l| log_line(&truncate(l, width)))
                .collect()
        };

        frame.render_widget(Paragraph::new(body).block(block), area);
    }
}

/// Dim a leading timestamp-looking token (contains `T` or `:`).
fn log_line(line: &str) -> Line<'static> {
    match line.split_once(' ') {
        Some((head, rest)) if head.contains('T') || head.contains(':') => Line::from(vec![
            Span::styled(head.to_string(), Theme::muted()),
            Span::raw(format!(" {rest}")),
        ]),
        _ => Line::raw(line.to_string()),
    }
}
