// System counters with CPU and memory history graphs

use super::format::format_bytes;
use super::graph;
use super::panel_block;
use super::series::SampleSeries;
use super::theme::Theme;
use crate::config::GraphStyle;
use crate::models::{ContainerSnapshot, SystemSnapshot};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

pub const GRAPH_HEIGHT: usize = 4;

#[derive(Debug, Clone, Default)]
pub struct StatsPanel {
    system: Option<SystemSnapshot>,
    cpu: SampleSeries,
    memory: SampleSeries,
    style: GraphStyle,
}

impl StatsPanel {
    pub fn new(style: GraphStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn system(&self) -> Option<&SystemSnapshot> {
        self.system.as_ref()
    }

    /// Take a fresh snapshot, derive its usage from `containers` and append
    /// one sample to each series.
    pub fn record(&mut self, mut snapshot: SystemSnapshot, containers: &[ContainerSnapshot]) {
        snapshot.recompute_usage(containers);
        self.cpu.push(snapshot.cpu_percent);
        self.memory.push(snapshot.memory_percent());
        self.system = Some(snapshot);
    }

    /// Refresh the aggregate from the current container list without sampling.
    pub fn refresh_usage(&mut self, containers: &[ContainerSnapshot]) {
        if let Some(system) = self.system.as_mut() {
            system.recompute_usage(containers);
        }
    }

    pub fn cpu_series(&self) -> &SampleSeries {
        &self.cpu
    }

    pub fn memory_series(&self) -> &SampleSeries {
        &self.memory
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, active: bool) {
        let block = panel_block(" Docker Stats ", active);
        let inner = block.inner(area);

        let Some(system) = &self.system else {
            let loading = Paragraph::new(Line::styled("Loading...", Theme::placeholder()));
            frame.render_widget(loading.block(block), area);
            return;
        };

        let graph_width = (inner.width as usize).saturating_sub(2).max(1);
        let mem_percent = system.memory_percent();

        let mut lines = vec![
            Line::from(vec![
                Span::raw("Containers: "),
                Span::styled(system.containers.to_string(), bold(Theme::CYAN)),
                Span::styled(
                    format!(" ({} running)", system.containers_running),
                    Style::default().fg(Theme::GREEN),
                ),
                Span::styled(
                    format!(" ({} paused)", system.containers_paused),
                    Style::default().fg(Theme::YELLOW),
                ),
                Span::styled(
                    format!(" ({} stopped)", system.containers_stopped),
                    Style::default().fg(Theme::RED),
                ),
            ]),
            Line::from(vec![
                Span::raw("Images: "),
                Span::styled(system.images.to_string(), bold(Theme::CYAN)),
            ]),
            Line::raw(""),
            Line::from(vec![
                Span::styled("CPU:", bold(Theme::CPU)),
                Span::styled(
                    format!(" {:.1}%", system.cpu_percent),
                    Style::default().fg(Theme::usage(system.cpu_percent)),
                ),
            ]),
        ];
        lines.extend(self.graph_lines(&self.cpu, graph_width, Theme::CPU));
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("MEM:", bold(Theme::MEMORY)),
            Span::styled(
                format!(
                    " {}/{}",
                    format_bytes(system.memory_usage_bytes),
                    format_bytes(system.memory_limit_bytes)
                ),
                Style::default().fg(Theme::usage(mem_percent)),
            ),
        ]));
        lines.extend(self.graph_lines(&self.memory, graph_width, Theme::MEMORY));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn graph_lines(&self, series: &SampleSeries, width: usize, color: Color) -> Vec<Line<'static>> {
        graph::render(self.style, &series.to_vec(), width, GRAPH_HEIGHT)
            .lines()
            .into_iter()
            .map(|row| Line::styled(row, Style::default().fg(color)))
            .collect()
    }
}

fn bold(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
