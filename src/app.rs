use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controller::{SprintController, SprintView, StatusKind};
use crate::evaluator::{CharState, Stats};
use crate::runtime::SprintEvent;

/// Everything the terminal screen shows, as last pushed by the controller
#[derive(Debug, Default, Clone)]
pub struct ScreenState {
    pub text: String,
    pub states: Vec<CharState>,
    pub stats: Stats,
    pub status: Option<(String, StatusKind)>,
    pub repository: String,
    pub path: String,
    pub loading: bool,
}

impl SprintView for ScreenState {
    fn render(&mut self, text: &str, states: &[CharState]) {
        self.text = text.to_string();
        self.states = states.to_vec();
    }

    fn set_stats(&mut self, stats: Stats) {
        self.stats = stats;
    }

    fn set_status_message(&mut self, text: &str, kind: StatusKind) {
        self.status = Some((text.to_string(), kind));
    }

    fn set_source_labels(&mut self, repository: &str, path: &str) {
        self.repository = repository.to_string();
        self.path = path.to_string();
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

pub struct App {
    pub controller: SprintController<ScreenState>,
}

impl App {
    pub fn new(controller: SprintController<ScreenState>) -> Self {
        Self { controller }
    }

    pub fn screen(&self) -> &ScreenState {
        self.controller.view()
    }

    pub fn handle_event(&mut self, event: SprintEvent, now: Instant) -> AppAction {
        match event {
            SprintEvent::Key(key) => return self.handle_key(key, now),
            SprintEvent::Tick => self.controller.on_tick(now),
            SprintEvent::FocusGained => self.controller.on_focus(now),
            SprintEvent::Loaded(outcome) => {
                self.controller.on_load_complete(outcome);
            }
            SprintEvent::Resize => {}
        }
        AppAction::Continue
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> AppAction {
        if key.kind == KeyEventKind::Release {
            return AppAction::Continue;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return AppAction::Quit,
                KeyCode::Char('l') => {
                    self.controller.select_next_language();
                }
                KeyCode::Char('f') => self.controller.select_next_file(),
                KeyCode::Char('r') => {
                    // mirrors a disabled load button while a load is running
                    if !self.controller.is_loading() {
                        self.controller.load_selected();
                    }
                }
                KeyCode::Char('n') => self.controller.reset(),
                _ => {}
            }
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Backspace => {
                self.controller.backspace(now);
            }
            KeyCode::Enter => {
                self.controller.push_char('\n', now);
            }
            KeyCode::Tab => {
                self.controller.push_char('\t', now);
            }
            KeyCode::Char(c) => {
                self.controller.push_char(c, now);
            }
            _ => {}
        }
        AppAction::Continue
    }
}
