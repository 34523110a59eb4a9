//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! IPC transport and the indicator runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod ipc;
pub mod pid_file;
pub mod presenter;
pub mod send_cmd;
pub mod signals;

// Re-export commonly used types
pub use app::{run_indicator, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, RunArgs, RunOptions};
pub use presenter::Presenter;
pub use send_cmd::{handle_send_command, handle_status_command};
pub use signals::HostWindow;
