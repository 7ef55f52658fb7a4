use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use log::{debug, info, warn};

use crate::catalog::SnippetSource;
use crate::fetch::SnippetFetcher;
use crate::snippet;

/// Identifies one load request. Later requests always compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    fn next(self) -> Self {
        RequestToken(self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Provenance {
    Network,
    Fallback,
}

/// Result of a finished load, delivered back to the controller
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub token: RequestToken,
    pub source: SnippetSource,
    pub text: String,
    pub provenance: Provenance,
}

/// Cooperative cancellation flag shared with a loader worker
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Sink that hands finished loads back to the event loop
pub type Delivery = Arc<dyn Fn(LoadOutcome) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct LoaderSettings {
    pub host: String,
    pub max_snippet_length: usize,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            host: crate::catalog::DEFAULT_HOST.to_string(),
            max_snippet_length: snippet::MAX_SNIPPET_LENGTH,
        }
    }
}

/// Fetch `source` and fall back to the demo snippet on any failure. Never fails.
pub fn resolve(
    fetcher: &dyn SnippetFetcher,
    token: RequestToken,
    source: &SnippetSource,
    settings: &LoaderSettings,
) -> LoadOutcome {
    let url = source.raw_url(&settings.host);
    let (text, provenance) = match fetcher.fetch(&url) {
        Ok(body) => (
            snippet::prepare(&body, settings.max_snippet_length),
            Provenance::Network,
        ),
        Err(e) => {
            warn!("fetch of {} failed, using demo snippet: {}", url, e);
            (
                snippet::fallback(settings.max_snippet_length),
                Provenance::Fallback,
            )
        }
    };

    LoadOutcome {
        token,
        source: source.clone(),
        text,
        provenance,
    }
}

/// Issues load requests and tracks which one is still allowed to land
pub struct SnippetLoader {
    fetcher: Arc<dyn SnippetFetcher>,
    delivery: Delivery,
    settings: LoaderSettings,
    latest: RequestToken,
    in_flight: Option<(RequestToken, CancelHandle)>,
}

impl SnippetLoader {
    pub fn new(
        fetcher: Arc<dyn SnippetFetcher>,
        delivery: Delivery,
        settings: LoaderSettings,
    ) -> Self {
        Self {
            fetcher,
            delivery,
            settings,
            latest: RequestToken::default(),
            in_flight: None,
        }
    }

    /// Start loading `source` on a worker thread, superseding any in-flight load
    pub fn load(&mut self, source: &SnippetSource) -> RequestToken {
        if let Some((stale, handle)) = self.in_flight.take() {
            debug!("cancelling load {:?}", stale);
            handle.cancel();
        }

        let token = self.latest.next();
        self.latest = token;
        let handle = CancelHandle::default();
        self.in_flight = Some((token, handle.clone()));

        info!("load {:?} issued for {}/{}", token, source.repository, source.path);

        let fetcher = Arc::clone(&self.fetcher);
        let delivery = Arc::clone(&self.delivery);
        let settings = self.settings.clone();
        let source = source.clone();
        thread::spawn(move || {
            let outcome = resolve(fetcher.as_ref(), token, &source, &settings);
            // the request cannot be aborted mid-flight, only its result dropped
            if handle.is_cancelled() {
                debug!("load {:?} finished after being superseded", token);
                return;
            }
            delivery(outcome);
        });

        token
    }

    pub fn latest(&self) -> RequestToken {
        self.latest
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        matches!(self.in_flight, Some((t, _)) if t == token) && token == self.latest
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Retire `token`. Returns false when the outcome is stale and must be dropped.
    pub fn finish(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }
}
