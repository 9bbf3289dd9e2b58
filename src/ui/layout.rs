// Screen partitioning for the dashboard panels

use ratatui::layout::Rect;

pub const BANNER_HEIGHT: u16 = 6;
pub const HELP_HEIGHT: u16 = 1;
pub const STATUS_HEIGHT: u16 = 1;
/// Stats and images: two 4-row graphs, counts and labels inside a border.
pub const TOP_HEIGHT: u16 = 17;
/// Border (2) plus the column header row.
pub const CONTAINER_CHROME: u16 = 3;
pub const MIN_LOGS_HEIGHT: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardLayout {
    pub banner: Rect,
    pub stats: Rect,
    pub images: Rect,
    pub containers: Rect,
    pub logs: Rect,
    /// Present only while an input prompt or error is shown.
    pub status: Option<Rect>,
    pub help: Rect,
}

impl DashboardLayout {
    /// Rows available for list items inside the containers panel.
    pub fn container_rows(&self) -> usize {
        self.containers.height.saturating_sub(CONTAINER_CHROME) as usize
    }

    /// Rows available for items inside the images panel (border + header).
    pub fn image_rows(&self) -> usize {
        self.images.height.saturating_sub(3) as usize
    }

    /// Rows available for log lines inside the logs panel border.
    pub fn log_rows(&self) -> usize {
        self.logs.height.saturating_sub(2) as usize
    }
}

/// Split `area` for the current container count.
///
/// Vertical order: banner, stats|images, containers, logs, the optional
/// status line, help. Heights are granted in priority order (banner, help,
/// status, top band, body) so a short terminal starves the body first.
pub fn compute(area: Rect, container_count: usize, status_line: bool) -> DashboardLayout {
    let mut remaining = area.height;
    let mut take = |want: u16| {
        let got = want.min(remaining);
        remaining -= got;
        got
    };

    let banner_h = take(BANNER_HEIGHT);
    let help_h = take(HELP_HEIGHT);
    let status_h = if status_line { take(STATUS_HEIGHT) } else { 0 };
    let top_h = take(TOP_HEIGHT);
    let body = take(u16::MAX);

    let (containers_h, logs_h) = split_body(body, container_count);

    let x = area.x;
    let w = area.width;
    let mut y = area.y;
    let mut row = |h: u16| {
        let r = Rect::new(x, y, w, h);
        y += h;
        r
    };

    let banner = row(banner_h);
    let top = row(top_h);
    let containers = row(containers_h);
    let logs = row(logs_h);
    let status = if status_line { Some(row(status_h)) } else { None };
    let help = row(help_h);

    let stats_w = w / 2;
    let stats = Rect::new(top.x, top.y, stats_w, top.height);
    let images = Rect::new(top.x + stats_w, top.y, w - stats_w, top.height);

    DashboardLayout {
        banner,
        stats,
        images,
        containers,
        logs,
        status,
        help,
    }
}

/// Containers get `count + chrome` rows (at least one item row's worth),
/// capped so logs keep up to [`MIN_LOGS_HEIGHT`]; logs take the rest.
fn split_body(body: u16, container_count: usize) -> (u16, u16) {
    if body == 0 {
        return (0, 0);
    }
    let min_logs = MIN_LOGS_HEIGHT.min(body.saturating_sub(1));
    let cap = (body - min_logs).max(1);
    let items = u16::try_from(container_count.max(1)).unwrap_or(u16::MAX);
    let wanted = items.saturating_add(CONTAINER_CHROME);
    let containers = wanted.min(cap);
    (containers, body - containers)
}
