//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, logging setup,
//! the conflict prompt, and the command runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod logging;
pub mod presenter;
pub mod prompt;

// Re-export commonly used types
pub use app::{
    load_merged_config, run_note, run_render, run_save, EXIT_ERROR, EXIT_SUCCESS,
    EXIT_USAGE_ERROR,
};
pub use args::{Cli, Commands, ConfigAction, NoteAction};
pub use logging::init_logging;
pub use presenter::Presenter;
pub use prompt::{resolver_for, PromptResolver};
