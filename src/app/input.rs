// Key interpretation: per-panel bindings and the text-entry modes

use crate::ui::Panel;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    FilterEntry,
    PullImageEntry,
}

/// What a key asks the dashboard to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPanel,
    Up,
    Down,
    Start,
    Stop,
    Restart,
    Remove,
    ToggleAutostart,
    OpenLogs,
    BackToContainers,
    ScrollToBottom,
    RemoveImage,
    /// Entered text for the active list's filter; empty clears it.
    ApplyFilter(String),
    PullImage(String),
}

/// In the entry modes every printable key, `q` included, goes into the
/// buffer. Only `Ctrl+C` still quits there.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    mode: Mode,
    buffer: String,
}

impl InputState {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Interpret `key` with `panel` focused. Mode changes happen here;
    /// everything else is returned as an [`Action`].
    pub fn handle_key(&mut self, key: KeyEvent, panel: Panel) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        match self.mode {
            Mode::Normal => self.normal_key(key, panel),
            Mode::FilterEntry | Mode::PullImageEntry => self.entry_key(key),
        }
    }

    fn begin(&mut self, mode: Mode) {
        self.mode = mode;
        self.buffer.clear();
    }

    fn normal_key(&mut self, key: KeyEvent, panel: Panel) -> Option<Action> {
        // Bindings are bare keys; Shift is allowed so `G` still resolves.
        if is_chord(key) {
            return None;
        }
        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Tab => return Some(Action::NextPanel),
            KeyCode::Char('j') | KeyCode::Down => return Some(Action::Down),
            KeyCode::Char('k') | KeyCode::Up => return Some(Action::Up),
            KeyCode::Char('/') => {
                self.begin(Mode::FilterEntry);
                return None;
            }
            _ => {}
        }
        match (panel, key.code) {
            (Panel::Containers, KeyCode::Char('s')) => Some(Action::Start),
            (Panel::Containers, KeyCode::Char('x')) => Some(Action::Stop),
            (Panel::Containers, KeyCode::Char('r')) => Some(Action::Restart),
            (Panel::Containers, KeyCode::Char('d')) => Some(Action::Remove),
            (Panel::Containers, KeyCode::Char('a')) => Some(Action::ToggleAutostart),
            (Panel::Containers, KeyCode::Enter) => Some(Action::OpenLogs),
            (Panel::Images, KeyCode::Char('d')) => Some(Action::RemoveImage),
            (Panel::Images, KeyCode::Char('p')) => {
                self.begin(Mode::PullImageEntry);
                None
            }
            (Panel::Logs, KeyCode::Esc) => Some(Action::BackToContainers),
            (Panel::Logs, KeyCode::Char('G')) => Some(Action::ScrollToBottom),
            _ => None,
        }
    }

    fn entry_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => {
                let text = std::mem::take(&mut self.buffer);
                let mode = std::mem::take(&mut self.mode);
                match mode {
                    Mode::FilterEntry => Some(Action::ApplyFilter(text.trim().to_string())),
                    Mode::PullImageEntry => {
                        let reference = text.trim();
                        (!reference.is_empty()).then(|| Action::PullImage(reference.to_string()))
                    }
                    Mode::Normal => None,
                }
            }
            KeyCode::Esc => {
                self.begin(Mode::Normal);
                None
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                None
            }
            KeyCode::Char(c) if !is_chord(key) => {
                self.buffer.push(c);
                None
            }
            _ => None,
        }
    }
}

/// Control or Alt held.
fn is_chord(key: KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
