use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Default location of the log file; the TUI owns stderr so logs go to disk
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("codesprint");
            Some(state_dir.join("codesprint.log"))
        } else {
            ProjectDirs::from("", "", "codesprint")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("codesprint.log"))
        }
    }
}
