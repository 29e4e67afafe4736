//! Main application logic for the terminal user interface.
//!
//! `App` owns the task database and every piece of UI state (focus,
//! selection, input buffers, open dialogs). Key handlers mutate the
//! database through its pure operations and persist after each change;
//! drawing reads the render model from `view`.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{error, info};

use crate::{
    db::Database,
    error::TodoError,
    fields::Priority,
    tui::{
        colors::{DARK_RED, GOLD, MUTED, WARNING},
        edit_form::EditForm,
        enums::{AppState, EditField, Focus},
        input::InputField,
        utils::centered_fixed,
        view,
    },
};

const EMPTY_ADD_WARNING: &str = "Please enter a task.";
const EMPTY_EDIT_WARNING: &str = "Task cannot be empty.";

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    db: Database,
    db_path: PathBuf,
    list_state: ListState,
    list_area: Rect,
    focus: Focus,
    new_task: InputField,
    new_priority: Priority,
    edit_form: Option<EditForm>,
    confirm_index: Option<usize>,
    warning: Option<String>,
    warning_return: AppState,
    status_message: String,
}

impl App {
    /// Create a new App, loading tasks from `db_path`.
    pub fn new(db_path: &Path) -> Self {
        let db = Database::load(db_path);
        info!(path = %db_path.display(), tasks = db.len(), "loaded tasks");
        App {
            state: AppState::TaskList,
            db,
            db_path: db_path.to_path_buf(),
            list_state: ListState::default(),
            list_area: Rect::default(),
            focus: Focus::NewTask,
            new_task: InputField::new(),
            new_priority: Priority::default(),
            edit_form: None,
            confirm_index: None,
            warning: None,
            warning_return: AppState::TaskList,
            status_message: String::new(),
        }
    }

    /// Index of the selected task, if any.
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected().filter(|&i| i < self.db.len())
    }

    fn select(&mut self, index: Option<usize>) {
        self.list_state.select(index);
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn show_warning(&mut self, msg: &str) {
        self.warning = Some(msg.to_string());
        self.warning_return = self.state;
        self.state = AppState::Warning;
    }

    /// Write the database to disk. A failed save keeps the in-memory change
    /// and reports it in the status bar.
    fn save_db(&mut self, done: &str) {
        match self.db.save(&self.db_path) {
            Ok(()) => self.set_status_message(done),
            Err(e) => {
                error!(path = %self.db_path.display(), error = %e, "failed to save tasks");
                self.set_status_message(format!("Error saving tasks: {e}"));
            }
        }
    }

    /// Add a task from the new-task input and priority selector.
    fn add_task(&mut self) {
        match self.db.add(&self.new_task.value, self.new_priority) {
            Ok(index) => {
                info!(index, priority = self.new_priority.label(), "task added");
                self.save_db("Task added");
                self.new_task.clear();
                self.focus = Focus::NewTask;
            }
            Err(TodoError::EmptyText) => self.show_warning(EMPTY_ADD_WARNING),
            Err(e) => self.set_status_message(format!("Error: {e}")),
        }
    }

    fn toggle_selected(&mut self) {
        let Some(index) = self.selected() else {
            return;
        };
        match self.db.toggle(index) {
            Ok(completed) => {
                info!(index, completed, "task toggled");
                self.save_db(if completed {
                    "Task completed"
                } else {
                    "Task reopened"
                });
            }
            Err(e) => self.set_status_message(format!("Error: {e}")),
        }
    }

    fn open_edit(&mut self) {
        let Some(index) = self.selected() else {
            return;
        };
        if let Some(task) = self.db.get(index) {
            self.edit_form = Some(EditForm::from_task(index, task));
            self.state = AppState::EditTask;
        }
    }

    fn save_edit(&mut self) {
        let Some(form) = self.edit_form.as_ref() else {
            self.state = AppState::TaskList;
            return;
        };
        let (index, priority) = (form.index, form.priority);
        let text = form.text.value.clone();

        match self.db.edit(index, &text, priority) {
            Ok(()) => {
                info!(index, priority = priority.label(), "task edited");
                self.save_db("Task updated");
                self.close_edit();
            }
            Err(TodoError::EmptyText) => self.show_warning(EMPTY_EDIT_WARNING),
            Err(e) => {
                self.set_status_message(format!("Error: {e}"));
                self.close_edit();
            }
        }
    }

    fn close_edit(&mut self) {
        self.edit_form = None;
        self.state = AppState::TaskList;
    }

    fn request_delete(&mut self) {
        if let Some(index) = self.selected() {
            self.confirm_index = Some(index);
            self.state = AppState::Confirm;
        }
    }

    fn delete_confirmed(&mut self) {
        if let Some(index) = self.confirm_index.take() {
            match self.db.remove(index) {
                Ok(task) => {
                    info!(index, text = %task.text, "task deleted");
                    self.save_db("Task deleted");
                    self.select(None);
                }
                Err(e) => self.set_status_message(format!("Error: {e}")),
            }
        }
        self.state = AppState::TaskList;
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.db.len();
        if len == 0 {
            self.select(None);
            return;
        }
        let next = match (self.selected(), down) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1).min(len - 1),
            (Some(i), false) => i.saturating_sub(1),
        };
        self.select(Some(next));
    }

    /// Dispatch a key press according to the current state.
    ///
    /// Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        self.status_message.clear();
        if let KeyCode::Char(c) = key {
            if modifiers.contains(KeyModifiers::CONTROL) {
                return self.state == AppState::TaskList && matches!(c, 'c' | 'q');
            }
        }
        match self.state {
            AppState::TaskList => self.handle_task_list_input(key),
            AppState::EditTask => {
                self.handle_edit_input(key);
                false
            }
            AppState::Confirm => {
                self.handle_confirm_input(key);
                false
            }
            AppState::Warning => {
                self.handle_warning_input(key);
                false
            }
        }
    }

    fn handle_task_list_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return false;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return false;
            }
            _ => {}
        }

        match self.focus {
            Focus::NewTask => match key {
                KeyCode::Enter => self.add_task(),
                KeyCode::Char(c) => self.new_task.handle_char(c),
                KeyCode::Backspace => self.new_task.handle_backspace(),
                KeyCode::Delete => self.new_task.handle_delete(),
                KeyCode::Left => self.new_task.move_cursor_left(),
                KeyCode::Right => self.new_task.move_cursor_right(),
                KeyCode::Home => self.new_task.move_home(),
                KeyCode::End => self.new_task.move_end(),
                _ => {}
            },
            Focus::Priority => match key {
                KeyCode::Enter => self.add_task(),
                KeyCode::Left | KeyCode::Up => self.new_priority = self.new_priority.prev(),
                KeyCode::Right | KeyCode::Down => self.new_priority = self.new_priority.next(),
                _ => {}
            },
            Focus::List => match key {
                KeyCode::Char('q') => return true,
                KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
                KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
                KeyCode::Home if !self.db.is_empty() => self.select(Some(0)),
                KeyCode::End if !self.db.is_empty() => self.select(Some(self.db.len() - 1)),
                KeyCode::Esc => self.select(None),
                KeyCode::Char(' ') | KeyCode::Char('c') => self.toggle_selected(),
                KeyCode::Char('e') | KeyCode::Enter => self.open_edit(),
                KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
                _ => {}
            },
        }
        false
    }

    fn handle_edit_input(&mut self, key: KeyCode) {
        if key == KeyCode::Enter {
            self.save_edit();
            return;
        }
        if key == KeyCode::Esc {
            self.close_edit();
            return;
        }
        let Some(form) = self.edit_form.as_mut() else {
            self.state = AppState::TaskList;
            return;
        };
        match key {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Left => form.handle_left_right(false),
            KeyCode::Right => form.handle_left_right(true),
            KeyCode::Home => form.text.move_home(),
            KeyCode::End => form.text.move_end(),
            KeyCode::Backspace => form.handle_backspace(),
            KeyCode::Delete => form.handle_delete(),
            KeyCode::Char(c) => form.handle_char(c),
            _ => {}
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.delete_confirmed(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_index = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
    }

    fn handle_warning_input(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.warning = None;
            self.state = self.warning_return;
        }
    }

    /// Clicks in the task list select the row under the pointer; the wheel
    /// moves the selection. Ignored while a dialog is open.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state != AppState::TaskList {
            return;
        }
        let inner = Block::default().borders(Borders::ALL).inner(self.list_area);
        let inside = mouse.column >= inner.x
            && mouse.column < inner.right()
            && mouse.row >= inner.y
            && mouse.row < inner.bottom();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                self.focus = Focus::List;
                let index = self.list_state.offset() + usize::from(mouse.row - inner.y);
                self.select((index < self.db.len()).then_some(index));
            }
            MouseEventKind::ScrollDown if inside => self.move_selection(true),
            MouseEventKind::ScrollUp if inside => self.move_selection(false),
            _ => {}
        }
    }

    /// Poll for and handle one keyboard or mouse event.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
        Ok(false)
    }

    fn focus_style(&self, focus: Focus) -> Style {
        if self.state == AppState::TaskList && self.focus == focus {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        }
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new(Line::from(Span::styled(
            "To-Do List",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        f.render_widget(title, area);
    }

    fn render_input_row(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(20),
                Constraint::Length(14),
                Constraint::Length(13),
            ])
            .split(area);

        let input_block = Block::default()
            .borders(Borders::ALL)
            .title("New Task")
            .border_style(self.focus_style(Focus::NewTask));
        let inner = input_block.inner(chunks[0]);
        let offset = self.new_task.scroll_offset(inner.width);
        f.render_widget(
            Paragraph::new(self.new_task.value.as_str())
                .scroll((0, offset))
                .block(input_block),
            chunks[0],
        );

        let priority_block = Block::default()
            .borders(Borders::ALL)
            .title("Priority")
            .border_style(self.focus_style(Focus::Priority));
        f.render_widget(
            Paragraph::new(format!("< {} >", self.new_priority.label()))
                .alignment(Alignment::Center)
                .block(priority_block),
            chunks[1],
        );

        f.render_widget(
            Paragraph::new("[Enter] Add")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            chunks[2],
        );

        if self.state == AppState::TaskList && self.focus == Focus::NewTask {
            let x = inner.x + (self.new_task.cursor as u16).saturating_sub(offset);
            f.set_cursor_position((x, inner.y));
        }
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = view::task_lines(&self.db.tasks)
            .into_iter()
            .map(|line| ListItem::new(line.text).style(line.emphasis.style()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Tasks")
                    .border_style(self.focus_style(Focus::List)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        self.list_area = area;
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    /// Complete/edit/delete only act on a selected task while the list has focus.
    fn actions_enabled(&self) -> bool {
        self.focus == Focus::List && self.selected().is_some()
    }

    fn render_actions(&self, f: &mut Frame, area: Rect) {
        let style = if self.actions_enabled() {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        let line = Line::from(vec![
            Span::styled("[Space] Complete", style),
            Span::raw("  "),
            Span::styled("[e] Edit", style),
            Span::raw("  "),
            Span::styled("[d] Delete", style),
            Span::styled("    Tab: switch focus  Ctrl+C: quit", Style::default().fg(MUTED)),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    /// Task counts on the left, the last action's message on the right.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let style = Style::default().bg(Color::Blue).fg(Color::White);
        f.render_widget(
            Paragraph::new(view::status_line(&self.db.tasks)).style(style),
            area,
        );
        if !self.status_message.is_empty() {
            f.render_widget(
                Paragraph::new(self.status_message.as_str())
                    .style(style)
                    .alignment(Alignment::Right),
                Rect {
                    x: area.x + area.width / 2,
                    width: area.width - area.width / 2,
                    ..area
                },
            );
        }
    }

    fn render_edit_dialog(&self, f: &mut Frame, area: Rect) {
        let Some(form) = self.edit_form.as_ref() else {
            return;
        };
        let area = centered_fixed(60, 10, area);
        f.render_widget(Clear, area);

        let block = Block::default()
            .title("Edit Task")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GOLD));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(inner);

        let field_style = |field: EditField| {
            if form.current_field == field {
                Style::default().fg(GOLD)
            } else {
                Style::default()
            }
        };

        let text_block = Block::default()
            .borders(Borders::ALL)
            .title("Task")
            .border_style(field_style(EditField::Text));
        let text_inner = text_block.inner(chunks[0]);
        let offset = form.text.scroll_offset(text_inner.width);
        f.render_widget(
            Paragraph::new(form.text.value.as_str())
                .scroll((0, offset))
                .block(text_block),
            chunks[0],
        );

        f.render_widget(
            Paragraph::new(format!("< {} >", form.priority.label())).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Priority")
                    .border_style(field_style(EditField::Priority)),
            ),
            chunks[1],
        );

        f.render_widget(
            Paragraph::new("Enter: Save  Esc: Cancel  Tab: next field")
                .alignment(Alignment::Center)
                .style(Style::default().fg(MUTED)),
            chunks[2],
        );

        if self.state == AppState::EditTask && form.current_field == EditField::Text {
            let x = text_inner.x + (form.text.cursor as u16).saturating_sub(offset);
            f.set_cursor_position((x, text_inner.y));
        }
    }

    /// Render the delete confirmation.
    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Confirm Delete")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_fixed(50, 8, area);
        f.render_widget(Clear, area);

        let task_text = self
            .confirm_index
            .and_then(|i| self.db.get(i))
            .map(|t| t.text.as_str())
            .unwrap_or("");
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Are you sure you want to delete this task?",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(task_text),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_warning(&self, f: &mut Frame, area: Rect) {
        let area = centered_fixed(40, 7, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.warning.as_deref().unwrap_or(""),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press Enter to continue"),
        ];
        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .title("Warning")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(WARNING)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Draw the main screen, then whichever dialogs are open on top of it.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_title(f, chunks[0]);
        self.render_input_row(f, chunks[1]);
        self.render_task_list(f, chunks[2]);
        self.render_actions(f, chunks[3]);
        self.render_status_bar(f, chunks[4]);

        let area = f.area();
        match self.state {
            AppState::TaskList => {}
            AppState::EditTask => self.render_edit_dialog(f, area),
            AppState::Confirm => self.render_confirm(f, area),
            AppState::Warning => {
                if self.warning_return == AppState::EditTask {
                    self.render_edit_dialog(f, area);
                }
                self.render_warning(f, area);
            }
        }
    }

    /// Main event loop: draw, then handle one input event, until quit.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
