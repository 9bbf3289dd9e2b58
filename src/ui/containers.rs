// Container table

use super::cursor::FilteredList;
use super::format::{format_bytes_short, pad};
use super::theme::Theme;
use super::panel_block;
use crate::models::{ContainerSnapshot, ContainerStatsPatch};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

const MARKER_WIDTH: usize = 2;
const CPU_WIDTH: usize = 8;
const MEM_WIDTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    name: usize,
    status: usize,
    ports: usize,
    image: usize,
}

impl Columns {
    /// Percent-based widths with per-column floors; the image column takes what is left.
    fn for_width(width: usize) -> Self {
        let name = (width * 18 / 100).max(12);
        let status = (width * 12 / 100).max(10);
        let ports = (width * 22 / 100).max(10);
        let used = MARKER_WIDTH + name + status + CPU_WIDTH + MEM_WIDTH + ports;
        let image = width.saturating_sub(used).max(10);
        Self {
            name,
            status,
            ports,
            image,
        }
    }
}

/// Cell of `width` columns including one trailing space.
fn cell(text: &str, width: usize) -> String {
    format!("{} ", pad(text, width.saturating_sub(1)))
}

#[derive(Debug, Clone, Default)]
pub struct ContainersPanel {
    list: FilteredList<ContainerSnapshot>,
}

impl ContainersPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_items(&mut self, items: Vec<ContainerSnapshot>) {
        self.list.set_items(items);
    }

    pub fn items(&self) -> &[ContainerSnapshot] {
        self.list.items()
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.list.set_filter(filter);
    }

    pub fn filter(&self) -> &str {
        self.list.filter()
    }

    pub fn filtered(&self) -> Vec<&ContainerSnapshot> {
        self.list.filtered()
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.list.move_selection(delta);
    }

    pub fn selected(&self) -> Option<&ContainerSnapshot> {
        self.list.selected()
    }

    pub fn set_visible_rows(&mut self, rows: usize) {
        self.list.set_visible_rows(rows);
    }

    /// Patch the metrics of the container with `id`. Returns false when it is gone.
    pub fn apply_stats(&mut self, id: &str, patch: &ContainerStatsPatch) -> bool {
        match self.list.items_mut().iter_mut().find(|c| c.id == id) {
            Some(container) => {
                container.apply_stats(patch);
                true
            }
            None => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, active: bool) {
        let mut title = " Containers ".to_string();
        if !self.filter().is_empty() {
            title.push_str(&format!("[filter: {}] ", self.filter()));
        }
        let block = panel_block(title, active);
        let inner = block.inner(area);
        let columns = Columns::for_width(inner.width as usize);

        let mut lines = vec![Line::styled(
            [
                " ".repeat(MARKER_WIDTH),
                cell("NAME", columns.name),
                cell("STATUS", columns.status),
                cell("CPU", CPU_WIDTH),
                cell("MEM", MEM_WIDTH),
                cell("PORTS", columns.ports),
                cell("IMAGE", columns.image),
            ]
            .concat(),
            Theme::header(),
        )];

        let filtered = self.filtered();
        if filtered.is_empty() {
            lines.push(Line::styled("  No containers found", Theme::placeholder()));
        } else {
            let rows = (inner.height as usize).saturating_sub(1).max(1);
            let cursor = self.list.cursor();
            let start = cursor.window_start(rows);
            for (i, c) in filtered.iter().enumerate().skip(start).take(rows) {
                lines.push(self.row(c, &columns, i == cursor.selected()));
            }
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn row(&self, c: &ContainerSnapshot, columns: &Columns, selected: bool) -> Line<'static> {
        let running = c.state.is_running();
        let (cpu, mem) = if running {
            (
                format!("{:.1}%", c.cpu_percent),
                format_bytes_short(c.memory_usage_bytes),
            )
        } else {
            ("-".to_string(), "-".to_string())
        };
        let base = if selected {
            Theme::selected()
        } else {
            Style::default()
        };
        let marker = if c.autostart { "A " } else { "  " };

        Line::from(vec![
            Span::styled(marker, base.fg(Theme::YELLOW)),
            Span::styled(cell(&c.name, columns.name), base),
            Span::styled(cell(&c.status, columns.status), base.fg(Theme::state(c.state))),
            Span::styled(
                cell(&cpu, CPU_WIDTH),
                if running {
                    base.fg(Theme::usage(c.cpu_percent))
                } else {
                    base.fg(Theme::GRAY)
                },
            ),
            Span::styled(cell(&mem, MEM_WIDTH), base.fg(Theme::MEMORY)),
            Span::styled(cell(&c.ports, columns.ports), base.fg(Theme::GRAY)),
            Span::styled(cell(&c.image, columns.image), base),
        ])
    }
}
