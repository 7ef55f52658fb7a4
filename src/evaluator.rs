use std::time::Instant;

/// Typing state of one reference position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharState {
    Correct,
    Incorrect,
    Pending,
    /// pending and under the cursor
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stats {
    pub words_per_minute: u32,
    pub accuracy_percent: u32,
    pub progress_percent: u32,
    pub elapsed_seconds: u64,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            words_per_minute: 0,
            accuracy_percent: 100,
            progress_percent: 0,
            elapsed_seconds: 0,
        }
    }
}

pub const CHARS_PER_WORD: f64 = 5.0;

/// Positional comparison of `input` against `reference`; no alignment recovery.
pub fn char_states(reference: &str, input: &str) -> Vec<CharState> {
    let typed: Vec<char> = input.chars().collect();

    reference
        .chars()
        .enumerate()
        .map(|(idx, expected)| match typed.get(idx) {
            None if idx == typed.len() => CharState::Active,
            None => CharState::Pending,
            Some(&c) if c == expected => CharState::Correct,
            Some(_) => CharState::Incorrect,
        })
        .collect()
}

pub fn correct_count(reference: &str, input: &str) -> usize {
    reference
        .chars()
        .zip(input.chars())
        .filter(|(expected, typed)| expected == typed)
        .count()
}

pub fn is_complete(reference: &str, input: &str) -> bool {
    let total = reference.chars().count();
    total > 0 && input.chars().count() >= total
}

pub fn evaluate(reference: &str, input: &str, start: Option<Instant>, now: Instant) -> Stats {
    let total_chars = reference.chars().count();
    let total_typed = input.chars().count();
    let correct = correct_count(reference, input);

    let progress_percent = if total_chars == 0 {
        0
    } else {
        ((total_typed as f64 / total_chars as f64).min(1.0) * 100.0).round() as u32
    };

    let accuracy_percent = if total_typed == 0 {
        100
    } else {
        ((correct as f64 / total_typed as f64) * 100.0)
            .round()
            .clamp(0.0, 100.0) as u32
    };

    let elapsed = start.map(|s| now.saturating_duration_since(s));
    let elapsed_seconds = elapsed.map_or(0, |d| d.as_secs());
    let elapsed_minutes = elapsed.map_or(0.0, |d| d.as_secs_f64() / 60.0);

    // a sprint younger than one whole second reports no speed
    let words_per_minute = if elapsed_seconds > 0 && elapsed_minutes > 0.0 {
        ((correct as f64 / CHARS_PER_WORD) / elapsed_minutes).round() as u32
    } else {
        0
    };

    Stats {
        words_per_minute,
        accuracy_percent,
        progress_percent,
        elapsed_seconds,
    }
}
