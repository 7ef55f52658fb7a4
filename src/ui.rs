use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{app::App, controller::StatusKind, evaluator::CharState};

const HORIZONTAL_MARGIN: u16 = 2;
const TAB_WIDTH: usize = 4;

struct GridStyles {
    correct: Style,
    incorrect: Style,
    pending: Style,
    active: Style,
}

impl GridStyles {
    fn new() -> Self {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);

        Self {
            correct: Style::default().patch(bold_style).fg(Color::Green),
            incorrect: Style::default().patch(bold_style).fg(Color::Red),
            pending: dim_bold_style,
            active: Style::default()
                .patch(dim_bold_style)
                .add_modifier(Modifier::UNDERLINED),
        }
    }

    fn for_state(&self, state: CharState) -> Style {
        match state {
            CharState::Correct => self.correct,
            CharState::Incorrect => self.incorrect,
            CharState::Pending => self.pending,
            CharState::Active => self.active,
        }
    }
}

/// Lay the reference out as styled lines. Returns the lines and the cursor's line index.
pub fn grid_lines(reference: &str, states: &[CharState]) -> (Vec<Line<'static>>, usize) {
    let styles = GridStyles::new();
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut cursor_line = None;

    for (c, &state) in reference.chars().zip(states) {
        if state == CharState::Active {
            cursor_line = Some(lines.len());
        }
        let style = styles.for_state(state);

        match c {
            '\n' => {
                // newlines are invisible unless they need attention
                if matches!(state, CharState::Active | CharState::Incorrect) {
                    spans.push(Span::styled("⏎", style));
                }
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
            '\t' => spans.push(Span::styled(" ".repeat(TAB_WIDTH), style)),
            ' ' if state == CharState::Incorrect => spans.push(Span::styled("·", style)),
            c => spans.push(Span::styled(c.to_string(), style)),
        }
    }
    lines.push(Line::from(spans));

    // fully typed: park the view on the last line
    let cursor_line = cursor_line.unwrap_or(lines.len() - 1);
    (lines, cursor_line)
}

/// Keep the cursor line roughly centred once the snippet outgrows the view
pub fn scroll_offset(cursor_line: usize, visible_lines: usize) -> usize {
    if visible_lines == 0 {
        return 0;
    }
    cursor_line.saturating_sub(visible_lines / 2)
}

pub fn format_stats(stats: &crate::evaluator::Stats) -> String {
    format!(
        "{} wpm   {}% acc   {}% progress   {}s",
        stats.words_per_minute,
        stats.accuracy_percent,
        stats.progress_percent,
        stats.elapsed_seconds
    )
}

/// Cut `label` from the left so it fits in `width` columns
fn fit_left(label: &str, width: usize) -> String {
    if label.width() <= width {
        return label.to_string();
    }
    let mut out: Vec<char> = Vec::new();
    let mut used = 1; // room for the ellipsis
    for c in label.chars().rev() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.reverse();
    format!("…{}", out.into_iter().collect::<String>())
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let screen = self.screen();
        let controller = &self.controller;
        let session = controller.session();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(2), // selection + source
                Constraint::Min(3),    // character grid
                Constraint::Length(1), // stats
                Constraint::Length(1), // status
                Constraint::Length(1), // legend
            ])
            .split(area);
        let width = chunks[0].width as usize;

        let selection = controller.selection();
        let language = selection.language(controller.catalog());
        let file = selection.source(controller.catalog());
        let mut picker = vec![
            Span::styled(language.label.clone(), bold_style.fg(Color::Cyan)),
            Span::raw(" ▸ "),
            Span::styled(file.label.clone(), bold_style),
        ];
        if screen.loading {
            picker.push(Span::styled(
                "   Loading...",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            ));
        }
        let origin = if screen.repository.is_empty() {
            String::new()
        } else {
            fit_left(&format!("{} · {}", screen.repository, screen.path), width)
        };
        Paragraph::new(vec![
            Line::from(picker),
            Line::from(Span::styled(origin, Style::default().fg(Color::Gray))),
        ])
        .render(chunks[0], buf);

        let block = Block::default().borders(Borders::ALL).title("Snippet");
        let visible_lines = block.inner(chunks[1]).height as usize;
        let (lines, cursor_line) = grid_lines(&screen.text, &screen.states);
        let offset = scroll_offset(cursor_line, visible_lines);
        Paragraph::new(lines)
            .block(block)
            .scroll((offset.min(u16::MAX as usize) as u16, 0))
            .render(chunks[1], buf);

        let stats_style = if session.is_completed() {
            bold_style.fg(Color::Green)
        } else {
            bold_style
        };
        Paragraph::new(Span::styled(format_stats(&screen.stats), stats_style))
            .render(chunks[2], buf);

        if let Some((text, kind)) = &screen.status {
            let color = match kind {
                StatusKind::Info => Color::Gray,
                StatusKind::Success => Color::Green,
                StatusKind::Warning => Color::Yellow,
            };
            Paragraph::new(Span::styled(text.clone(), Style::default().fg(color)))
                .render(chunks[3], buf);
        }

        let legend = if session.is_completed() {
            "sprint complete! (^n) retry / (^r) reload / (^l)anguage / (^f)ile / (esc)ape"
        } else {
            "(^l)anguage / (^f)ile / (^r) load / (^n) reset / (esc)ape"
        };
        Paragraph::new(Span::styled(legend, italic_style)).render(chunks[4], buf);
    }
}
