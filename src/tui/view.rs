//! Render model for the task list.
//!
//! These functions only read the task list, so the same tasks always give
//! the same lines. Widgets are built from them in `app`.

use ratatui::style::{Color, Style};

use crate::{
    fields::Priority,
    task::Task,
    tui::colors::{ALERT, MUTED, WARNING},
};

pub const DONE_GLYPH: char = '✓';
pub const OPEN_GLYPH: char = '○';

/// Display class of a task line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    Muted,
    Alert,
    Warning,
    Normal,
}

impl Emphasis {
    pub fn color(self) -> Option<Color> {
        match self {
            Emphasis::Muted => Some(MUTED),
            Emphasis::Alert => Some(ALERT),
            Emphasis::Warning => Some(WARNING),
            Emphasis::Normal => None,
        }
    }

    pub fn style(self) -> Style {
        match self.color() {
            Some(color) => Style::default().fg(color),
            None => Style::default(),
        }
    }
}

/// One rendered row of the task list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskLine {
    pub text: String,
    pub emphasis: Emphasis,
}

/// Completed tasks are muted whatever their priority.
pub fn emphasis(task: &Task) -> Emphasis {
    if task.completed {
        return Emphasis::Muted;
    }
    match task.priority {
        Priority::High => Emphasis::Alert,
        Priority::Medium => Emphasis::Warning,
        Priority::Low => Emphasis::Normal,
    }
}

/// `"{n}. [{P}] {text} {glyph}"` with a 1-based position.
pub fn task_line(index: usize, task: &Task) -> String {
    let glyph = if task.completed { DONE_GLYPH } else { OPEN_GLYPH };
    format!("{}. [{}] {} {}", index + 1, task.priority.code(), task.text, glyph)
}

pub fn task_lines(tasks: &[Task]) -> Vec<TaskLine> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| TaskLine {
            text: task_line(i, t),
            emphasis: emphasis(t),
        })
        .collect()
}

pub fn status_line(tasks: &[Task]) -> String {
    let completed = tasks.iter().filter(|t| t.completed).count();
    format!("Total tasks: {} | Completed: {}", tasks.len(), completed)
}
