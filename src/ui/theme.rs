// Dashboard palette and usage thresholds

use crate::models::ContainerState;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    pub const GREEN: Color = Color::Indexed(46);
    pub const YELLOW: Color = Color::Indexed(226);
    pub const RED: Color = Color::Indexed(196);
    pub const BLUE: Color = Color::Indexed(39);
    pub const PURPLE: Color = Color::Indexed(171);
    pub const CYAN: Color = Color::Indexed(51);
    pub const ORANGE: Color = Color::Indexed(208);
    pub const PINK: Color = Color::Indexed(205);
    pub const WHITE: Color = Color::Indexed(255);
    pub const GRAY: Color = Color::Indexed(244);

    /// CPU graph and figures.
    pub const CPU: Color = Self::CYAN;
    /// Memory graph and figures.
    pub const MEMORY: Color = Self::PURPLE;

    pub const BORDER: Color = Self::GRAY;
    pub const BORDER_ACTIVE: Color = Self::BLUE;

    pub fn header() -> Style {
        Style::default().fg(Self::BLUE).add_modifier(Modifier::BOLD)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::GRAY)
    }

    pub fn placeholder() -> Style {
        Style::default()
            .fg(Self::GRAY)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::Indexed(238))
            .fg(Self::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::RED).add_modifier(Modifier::BOLD)
    }

    pub fn title(active: bool) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        if active {
            style.fg(Self::PINK)
        } else {
            style.fg(Self::WHITE)
        }
    }

    pub fn border(active: bool) -> Style {
        Style::default().fg(if active {
            Self::BORDER_ACTIVE
        } else {
            Self::BORDER
        })
    }

    /// Green below 50%, yellow from 50%, red from 80%.
    pub fn usage(percent: f64) -> Color {
        if percent >= 80.0 {
            Self::RED
        } else if percent >= 50.0 {
            Self::YELLOW
        } else {
            Self::GREEN
        }
    }

    pub fn state(state: ContainerState) -> Color {
        match state {
            ContainerState::Running => Self::GREEN,
            ContainerState::Paused | ContainerState::Restarting => Self::YELLOW,
            ContainerState::Created | ContainerState::Removing => Self::ORANGE,
            ContainerState::Exited | ContainerState::Dead => Self::RED,
        }
    }
}
