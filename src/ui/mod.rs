// Terminal presentation: pure layout/graph helpers and the panels

pub mod banner;
pub mod containers;
pub mod cursor;
pub mod format;
pub mod graph;
pub mod help;
pub mod images;
pub mod layout;
pub mod logs;
pub mod series;
pub mod stats;
pub mod status;
pub mod theme;

pub use containers::ContainersPanel;
pub use images::ImagesPanel;
pub use logs::LogsPanel;
pub use stats::StatsPanel;
pub use status::StatusLine;

use ratatui::{
    text::Line,
    widgets::{Block, BorderType, Borders},
};
use theme::Theme;

/// Panel identity; exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Stats,
    Images,
    Containers,
    Logs,
}

impl Panel {
    /// Tab order. Stats is display-only and never receives focus via Tab.
    pub fn next(self) -> Panel {
        match self {
            Panel::Containers => Panel::Images,
            Panel::Images => Panel::Logs,
            Panel::Logs | Panel::Stats => Panel::Containers,
        }
    }
}

impl From<crate::config::DefaultView> for Panel {
    fn from(view: crate::config::DefaultView) -> Self {
        use crate::config::DefaultView;
        match view {
            DefaultView::Containers => Panel::Containers,
            DefaultView::Images => Panel::Images,
            DefaultView::Logs => Panel::Logs,
        }
    }
}

/// Rounded, titled border; highlighted when the panel has focus.
pub(crate) fn panel_block<'a>(title: impl Into<Line<'a>>, active: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border(active))
        .title(title)
        .title_style(Theme::title(active))
}
