use std::time::Instant;

use crate::evaluator::{self, CharState, Stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running,
}

/// What an input event did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    /// nothing loaded yet, or the sprint already finished
    Ignored,
    Updated,
    Completed,
}

/// One sprint over the current reference text
#[derive(Debug, Clone, Default)]
pub struct SprintSession {
    reference: String,
    input: String,
    started_at: Option<Instant>,
    timer: TimerState,
    completed: bool,
}

impl SprintSession {
    pub fn new(reference: String) -> Self {
        Self {
            reference,
            ..Self::default()
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn timer(&self) -> TimerState {
        self.timer
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Swap in a freshly loaded reference; always ends any running sprint
    pub fn replace_reference(&mut self, reference: String) {
        self.reference = reference;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.started_at = None;
        self.timer = TimerState::Idle;
        self.completed = false;
    }

    /// Replace the live input with `text`, as a text field would report it
    pub fn apply_input(&mut self, text: &str, now: Instant) -> InputEffect {
        if self.reference.is_empty() || self.completed {
            return InputEffect::Ignored;
        }

        self.input.clear();
        self.input.push_str(text);

        if self.started_at.is_none() && !self.input.is_empty() {
            self.start(now);
        }

        if evaluator::is_complete(&self.reference, &self.input) {
            self.completed = true;
            self.timer = TimerState::Idle;
            return InputEffect::Completed;
        }

        InputEffect::Updated
    }

    pub fn push_char(&mut self, c: char, now: Instant) -> InputEffect {
        let mut text = self.input.clone();
        text.push(c);
        self.apply_input(&text, now)
    }

    pub fn backspace(&mut self, now: Instant) -> InputEffect {
        let mut text = self.input.clone();
        if text.pop().is_none() {
            return InputEffect::Ignored;
        }
        self.apply_input(&text, now)
    }

    /// Regaining focus resumes an interrupted sprint but never restarts its clock
    pub fn focus(&mut self, now: Instant) -> bool {
        if self.completed {
            return false;
        }
        if self.started_at.is_none() && !self.input.is_empty() {
            self.start(now);
            return true;
        }
        false
    }

    fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.timer = TimerState::Running;
    }

    pub fn stats(&self, now: Instant) -> Stats {
        evaluator::evaluate(&self.reference, &self.input, self.started_at, now)
    }

    pub fn char_states(&self) -> Vec<CharState> {
        evaluator::char_states(&self.reference, &self.input)
    }
}
