use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};

use crate::catalog::{Catalog, Selection, SnippetSource};
use crate::evaluator::{CharState, Stats};
use crate::fetch::SnippetFetcher;
use crate::loader::{
    Delivery, LoadOutcome, LoaderSettings, Provenance, RequestToken, SnippetLoader,
};
use crate::session::{InputEffect, SprintSession, TimerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
}

pub const STATUS_LOADING: &str = "Loading snippet...";
pub const STATUS_NETWORK: &str = "Loaded from GitHub";
pub const STATUS_FALLBACK: &str = "GitHub unavailable, loaded demo snippet";

/// Outbound calls from the controller to whatever displays the sprint
pub trait SprintView {
    /// Redraw the reference text, coloured by the per-character states
    fn render(&mut self, text: &str, states: &[CharState]);
    fn set_stats(&mut self, stats: Stats);
    fn set_status_message(&mut self, text: &str, kind: StatusKind);
    fn set_source_labels(&mut self, repository: &str, path: &str);
    fn set_loading(&mut self, loading: bool);
}

/// Owns every piece of sprint state and routes triggers to the session and loader
pub struct SprintController<V: SprintView> {
    catalog: Catalog,
    selection: Selection,
    session: SprintSession,
    loader: SnippetLoader,
    stats: Stats,
    view: V,
}

impl<V: SprintView> SprintController<V> {
    pub fn new(
        catalog: Catalog,
        selection: Selection,
        fetcher: Arc<dyn SnippetFetcher>,
        delivery: Delivery,
        settings: LoaderSettings,
        view: V,
    ) -> Self {
        Self {
            catalog,
            selection,
            session: SprintSession::default(),
            loader: SnippetLoader::new(fetcher, delivery, settings),
            stats: Stats::default(),
            view,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn session(&self) -> &SprintSession {
        &self.session
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn load(&mut self, source: &SnippetSource) -> RequestToken {
        self.view.set_loading(true);
        self.view.set_status_message(STATUS_LOADING, StatusKind::Info);
        self.loader.load(source)
    }

    pub fn load_selected(&mut self) -> RequestToken {
        let source = self.selection.source(&self.catalog).clone();
        self.load(&source)
    }

    /// Changing language loads its first file right away
    pub fn select_next_language(&mut self) -> RequestToken {
        self.selection.next_language(&self.catalog);
        self.load_selected()
    }

    pub fn select_next_file(&mut self) {
        self.selection.next_file(&self.catalog);
    }

    /// Apply a finished load. Returns false if a newer load superseded it.
    pub fn on_load_complete(&mut self, outcome: LoadOutcome) -> bool {
        if !self.loader.finish(outcome.token) {
            debug!(
                "dropping stale load {:?} (latest {:?})",
                outcome.token,
                self.loader.latest()
            );
            return false;
        }

        self.view.set_loading(false);
        self.view
            .set_source_labels(&outcome.source.repository, &outcome.source.path);
        self.session.replace_reference(outcome.text);
        self.publish_stats(Stats::default());
        self.render();

        match outcome.provenance {
            Provenance::Network => self
                .view
                .set_status_message(STATUS_NETWORK, StatusKind::Success),
            Provenance::Fallback => self
                .view
                .set_status_message(STATUS_FALLBACK, StatusKind::Warning),
        }

        info!(
            "load {:?} applied: {} ({}, {} chars)",
            outcome.token,
            outcome.source.label,
            outcome.provenance,
            self.session.reference().chars().count()
        );
        true
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.publish_stats(Stats::default());
        self.render();
    }

    pub fn on_input(&mut self, text: &str, now: Instant) -> InputEffect {
        let effect = self.session.apply_input(text, now);
        self.after_input(effect, now)
    }

    pub fn push_char(&mut self, c: char, now: Instant) -> InputEffect {
        let effect = self.session.push_char(c, now);
        self.after_input(effect, now)
    }

    pub fn backspace(&mut self, now: Instant) -> InputEffect {
        let effect = self.session.backspace(now);
        self.after_input(effect, now)
    }

    fn after_input(&mut self, effect: InputEffect, now: Instant) -> InputEffect {
        if effect == InputEffect::Ignored {
            return effect;
        }
        self.publish_stats(self.session.stats(now));
        self.render();
        if effect == InputEffect::Completed {
            info!(
                "sprint complete: {} wpm, {}% acc, {}s",
                self.stats.words_per_minute,
                self.stats.accuracy_percent,
                self.stats.elapsed_seconds
            );
        }
        effect
    }

    pub fn on_focus(&mut self, now: Instant) {
        if self.session.focus(now) {
            self.publish_stats(self.session.stats(now));
        }
    }

    /// Periodic refresh of the elapsed readout; a no-op unless the timer runs
    pub fn on_tick(&mut self, now: Instant) {
        if self.session.timer() != TimerState::Running {
            return;
        }
        let elapsed_seconds = self.session.stats(now).elapsed_seconds;
        if elapsed_seconds != self.stats.elapsed_seconds {
            self.publish_stats(Stats {
                elapsed_seconds,
                ..self.stats
            });
        }
    }

    fn render(&mut self) {
        self.view
            .render(self.session.reference(), &self.session.char_states());
    }

    fn publish_stats(&mut self, stats: Stats) {
        self.stats = stats;
        self.view.set_stats(stats);
    }
}
