//! # todo - terminal to-do list
//!
//! A single-user to-do list manager. Tasks have a text, a priority
//! (Low, Medium or High) and a completion flag. They are shown in a
//! full-screen terminal UI and saved to a JSON file after every change.
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the list stored in ./tasks.json
//! todo
//!
//! # Use another file and keep a diagnostic log
//! todo --db ~/notes/tasks.json --log /tmp/todo.log
//! ```
//!
//! ## Keys
//!
//! - `Tab` / `Shift+Tab` - move focus between the new-task input, the priority
//!   selector and the task list
//! - `Enter` in the input or selector - add the task
//! - `Up` / `Down` in the list - select a task, `Esc` clears the selection
//! - `Space` - mark complete / reopen, `e` - edit, `d` - delete (asks first)
//! - `Ctrl+C` - quit
//!
//! The data file is a JSON array of `{"task", "priority", "completed"}`
//! objects. A missing or unreadable file starts an empty list.

use std::process::ExitCode;

use clap::Parser;

pub mod cli;
pub mod db;
pub mod error;
pub mod fields;
pub mod logging;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod edit_form;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
    pub mod view;
}

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.log.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    match tui::run::run_tui(&cli.db) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "terminal error");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
