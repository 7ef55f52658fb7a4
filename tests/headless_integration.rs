use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use codesprint::app::{App, AppAction, ScreenState};
use codesprint::catalog::{Catalog, Selection};
use codesprint::controller::{SprintController, StatusKind};
use codesprint::fetch::{FetchError, OfflineFetcher, SnippetFetcher};
use codesprint::loader::LoaderSettings;
use codesprint::runtime::{self, FixedTicker, Runner, SprintEvent, TestEventSource};
use codesprint::session::TimerState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

struct StaticFetcher(&'static str);

impl SnippetFetcher for StaticFetcher {
    fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        Ok(self.0.to_string())
    }
}

fn build_app(fetcher: Arc<dyn SnippetFetcher>, tx: mpsc::Sender<SprintEvent>) -> App {
    let controller = SprintController::new(
        Catalog::builtin().unwrap(),
        Selection::default(),
        fetcher,
        runtime::delivery_for(tx),
        LoaderSettings::default(),
        ScreenState::default(),
    );
    App::new(controller)
}

fn key(c: char) -> SprintEvent {
    SprintEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// Drive the runner until a load lands or the step budget runs out
fn pump_until_loaded<T: runtime::Ticker>(
    app: &mut App,
    runner: &mut Runner<TestEventSource, T>,
) {
    for _ in 0..200u32 {
        let event = runner.step();
        let loaded = matches!(event, SprintEvent::Loaded(_));
        app.handle_event(event, Instant::now());
        if loaded {
            return;
        }
    }
    panic!("load never arrived");
}

#[test]
fn headless_sprint_completes_over_network_text() {
    let (tx, rx) = mpsc::channel();
    let mut app = build_app(Arc::new(StaticFetcher("hi\r\n")), tx.clone());
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    app.controller.load_selected();
    pump_until_loaded(&mut app, &mut runner);

    assert_eq!(app.controller.session().reference(), "hi");
    assert_eq!(
        app.screen().status,
        Some(("Loaded from GitHub".to_string(), StatusKind::Success))
    );

    tx.send(key('h')).unwrap();
    tx.send(key('i')).unwrap();
    for _ in 0..100u32 {
        app.handle_event(runner.step(), Instant::now());
        if app.controller.session().is_completed() {
            break;
        }
    }

    let session = app.controller.session();
    assert!(session.is_completed(), "sprint should have completed");
    assert_eq!(session.timer(), TimerState::Idle);
    assert_eq!(app.screen().stats.progress_percent, 100);
    assert_eq!(app.screen().stats.accuracy_percent, 100);
}

#[test]
fn headless_offline_uses_fallback_snippet() {
    let (tx, rx) = mpsc::channel();
    let mut app = build_app(Arc::new(OfflineFetcher), tx);
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    app.controller.load_selected();
    pump_until_loaded(&mut app, &mut runner);

    assert!(app
        .controller
        .session()
        .reference()
        .starts_with("function greetDeveloper(name) {"));
    assert_eq!(
        app.screen().status,
        Some((
            "GitHub unavailable, loaded demo snippet".to_string(),
            StatusKind::Warning
        ))
    );
    assert!(!app.screen().loading);
}

#[test]
fn headless_escape_quits() {
    let (tx, rx) = mpsc::channel();
    let mut app = build_app(Arc::new(OfflineFetcher), tx.clone());
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    tx.send(SprintEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
        .unwrap();

    assert_eq!(
        app.handle_event(runner.step(), Instant::now()),
        AppAction::Quit
    );
}

#[test]
fn headless_elapsed_readout_advances_under_steady_input() {
    let (tx, rx) = mpsc::channel();
    let mut app = build_app(Arc::new(StaticFetcher("hello world")), tx.clone());
    let mut runner = Runner::new(TestEventSource::new(rx), FixedTicker::default());

    app.controller.load_selected();
    pump_until_loaded(&mut app, &mut runner);
    app.handle_event(key('h'), Instant::now());
    assert_eq!(app.controller.session().timer(), TimerState::Running);

    // keys that change nothing, arriving faster than the tick interval
    let feeder = std::thread::spawn(move || {
        for _ in 0..8 {
            let left = SprintEvent::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
            if tx.send(left).is_err() {
                break;
            }
            std::thread::sleep(Duration::from_millis(400));
        }
    });

    let started = Instant::now();
    while started.elapsed() < Duration::from_millis(2600) {
        app.handle_event(runner.step(), Instant::now());
    }
    feeder.join().unwrap();

    assert!(
        app.screen().stats.elapsed_seconds >= 2,
        "elapsed readout stuck at {}s",
        app.screen().stats.elapsed_seconds
    );
    assert_eq!(app.controller.session().input(), "h");
}
