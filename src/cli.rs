use std::path::PathBuf;

use clap::Parser;

/// Simple, file-backed to-do list with a terminal UI.
/// Storage defaults to ./tasks.json or a path passed via --db.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Terminal to-do list manager")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long, default_value = "tasks.json")]
    pub db: PathBuf,

    /// Write diagnostic logs to this file (level from RUST_LOG, default info).
    #[arg(long, value_name = "PATH")]
    pub log: Option<PathBuf>,
}
