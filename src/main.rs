use codesprint::{
    app::{App, AppAction, ScreenState},
    app_dirs::AppDirs,
    catalog::Catalog,
    config::{Config, ConfigStore, FileConfigStore},
    controller::SprintController,
    fetch::{HttpFetcher, OfflineFetcher, SnippetFetcher},
    logging,
    runtime::{self, CrosstermEventSource, FixedTicker, Runner, SprintEventSource, Ticker},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    path::PathBuf,
    sync::Arc,
    time::Instant,
};

/// typing sprints over real-world source code
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Retype snippets of well-known open source files fetched from GitHub, with live speed, accuracy and progress readouts."
)]
pub struct Cli {
    /// language to start with (javascript, python, go, rust, java)
    #[clap(short = 'l', long)]
    language: Option<String>,

    /// index of the file within the language
    #[clap(short = 'f', long)]
    file: Option<usize>,

    /// raw-content host to fetch snippets from
    #[clap(long)]
    host: Option<String>,

    /// never touch the network, always use the built-in demo snippet
    #[clap(long)]
    offline: bool,

    /// request timeout in seconds
    #[clap(short = 't', long)]
    timeout: Option<u64>,

    /// print the snippet catalog and exit
    #[clap(long)]
    list: bool,

    /// store the effective settings as the new defaults
    #[clap(long)]
    save: bool,

    /// log file (defaults to the state directory)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Layer command line flags over the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(language) = &self.language {
            config.language = language.clone();
            config.file = 0;
        }
        if let Some(file) = self.file {
            config.file = file;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        config.offline |= self.offline;
        config
    }
}

fn print_catalog<W: Write>(catalog: &Catalog, out: &mut W) -> io::Result<()> {
    for language in &catalog.languages {
        writeln!(out, "{} ({})", language.label, language.key)?;
        for (idx, file) in language.files.iter().enumerate() {
            writeln!(
                out,
                "  [{}] {:<22} {}/{}",
                idx, file.label, file.repository, file.path
            )?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let catalog = Catalog::builtin()?;

    if cli.list {
        print_catalog(&catalog, &mut io::stdout().lock())?;
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        logging::init(&path)?;
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    let selection = catalog.selection(&config.language, config.file)?;
    if cli.save {
        store.save(&config)?;
        log::info!("saved settings to {}", store.path().display());
    }

    let fetcher: Arc<dyn SnippetFetcher> = if config.offline {
        Arc::new(OfflineFetcher)
    } else {
        Arc::new(HttpFetcher::new(config.timeout())?)
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = CrosstermEventSource::new();
    let controller = SprintController::new(
        catalog,
        selection,
        fetcher,
        runtime::delivery_for(events.sender()),
        config.loader_settings(),
        ScreenState::default(),
    );
    let mut app = App::new(controller);
    let mut runner = Runner::new(events, FixedTicker::default());

    let result = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: SprintEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    app.controller.load_selected();

    loop {
        terminal.draw(|f| ui(app, f))?;

        if app.handle_event(runner.step(), Instant::now()) == AppAction::Quit {
            break;
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
