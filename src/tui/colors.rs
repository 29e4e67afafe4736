//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Incomplete High-priority tasks.
pub const ALERT: Color = Color::Red;
/// Incomplete Medium-priority tasks.
pub const WARNING: Color = Color::Rgb(255, 165, 0);
/// Completed tasks and disabled actions.
pub const MUTED: Color = Color::DarkGray;
/// Focused widget borders and labels.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Background of the delete confirmation.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
