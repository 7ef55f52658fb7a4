use std::fs::{self, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Initialize logging into `path` (reads RUST_LOG env var, default info).
///
/// The terminal is in raw/alternate-screen mode while the app runs, so log
/// lines must never reach stderr.
pub fn init(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    // ignore double-init from tests
    let _ = Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(Target::Pipe(Box::new(file)))
        .try_init();

    log::info!("codesprint {} starting up", env!("CARGO_PKG_VERSION"));
    Ok(())
}
