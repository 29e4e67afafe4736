//! Enumerations for TUI state management.

/// Which screen or overlay receives key presses.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    EditTask,
    Confirm,
    Warning,
}

/// Focused widget on the main screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    NewTask,
    Priority,
    List,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::NewTask => Focus::Priority,
            Focus::Priority => Focus::List,
            Focus::List => Focus::NewTask,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::NewTask => Focus::List,
            Focus::Priority => Focus::NewTask,
            Focus::List => Focus::Priority,
        }
    }
}

/// Focused field inside the edit dialog.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EditField {
    Text,
    Priority,
}
