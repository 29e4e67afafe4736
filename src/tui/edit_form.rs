//! State of the modal edit dialog.

use crate::{
    fields::Priority,
    task::Task,
    tui::{enums::EditField, input::InputField},
};

/// Edit dialog seeded from a task; remembers which index it edits.
#[derive(Clone, Debug)]
pub struct EditForm {
    pub index: usize,
    pub text: InputField,
    pub priority: Priority,
    pub current_field: EditField,
}

impl EditForm {
    pub fn from_task(index: usize, task: &Task) -> Self {
        Self {
            index,
            text: InputField::with_value(&task.text),
            priority: task.priority,
            current_field: EditField::Text,
        }
    }

    /// Move between the text and priority fields.
    pub fn toggle_field(&mut self) {
        self.current_field = match self.current_field {
            EditField::Text => EditField::Priority,
            EditField::Priority => EditField::Text,
        };
    }

    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            EditField::Text if right => self.text.move_cursor_right(),
            EditField::Text => self.text.move_cursor_left(),
            EditField::Priority if right => self.priority = self.priority.next(),
            EditField::Priority => self.priority = self.priority.prev(),
        }
    }

    /// Typed characters only go to the text field.
    pub fn handle_char(&mut self, c: char) {
        if self.current_field == EditField::Text {
            self.text.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if self.current_field == EditField::Text {
            self.text.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if self.current_field == EditField::Text {
            self.text.handle_delete();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_from_task() {
        let task = Task::new("Finish report", Priority::High);
        let form = EditForm::from_task(4, &task);
        assert_eq!(form.index, 4);
        assert_eq!(form.text.value, "Finish report");
        assert_eq!(form.priority, Priority::High);
        assert_eq!(form.current_field, EditField::Text);
    }

    #[test]
    fn arrows_cycle_priority_only_on_priority_field() {
        let mut form = EditForm::from_task(0, &Task::new("x", Priority::Low));
        form.handle_left_right(true);
        assert_eq!(form.priority, Priority::Low);

        form.toggle_field();
        form.handle_left_right(true);
        assert_eq!(form.priority, Priority::Medium);
        form.handle_left_right(false);
        form.handle_left_right(false);
        assert_eq!(form.priority, Priority::High);
    }

    #[test]
    fn typing_on_priority_field_is_ignored() {
        let mut form = EditForm::from_task(0, &Task::new("x", Priority::Low));
        form.toggle_field();
        form.handle_char('y');
        form.handle_backspace();
        assert_eq!(form.text.value, "x");
    }
}
