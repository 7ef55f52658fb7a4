// Library surface for headless/integration tests and reuse.
// Terminal setup and argument parsing stay in main.rs.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod evaluator;
pub mod fetch;
pub mod loader;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod snippet;
pub mod ui;
