//! Task storage and the mutations applied to it.
//!
//! `Database` owns the ordered task list. Mutations are plain in-memory
//! operations; callers persist with [`Database::save`] afterwards.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, TodoError};
use crate::fields::Priority;
use crate::task::Task;

/// In-memory task list. Serialized as a bare JSON array.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Database {
    pub tasks: Vec<Task>,
}

impl Database {
    /// Load tasks from a JSON file.
    ///
    /// A missing, unreadable or unparseable file yields an empty database.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no task file, starting empty");
            return Database::default();
        }
        let mut buf = String::new();
        match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(_) => match serde_json::from_str(&buf) {
                Ok(db) => db,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "error parsing task file, starting empty");
                    Database::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "error reading task file, starting empty");
                Database::default()
            }
        }
    }

    /// Write all tasks to `path`, replacing its contents (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(self)?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(&tmp, path)?;
        debug!(path = %path.display(), tasks = self.tasks.len(), "saved tasks");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Append a new incomplete task and return its index.
    pub fn add(&mut self, text: &str, priority: Priority) -> Result<usize> {
        let text = validate_text(text)?;
        self.tasks.push(Task::new(text, priority));
        Ok(self.tasks.len() - 1)
    }

    /// Flip the completion flag at `index`, returning the new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let task = self.get_mut(index)?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Replace the text and priority of the task at `index`.
    /// Completion state is left as is.
    pub fn edit(&mut self, index: usize, text: &str, priority: Priority) -> Result<()> {
        let text = validate_text(text)?;
        let task = self.get_mut(index)?;
        task.text = text.to_string();
        task.priority = priority;
        Ok(())
    }

    /// Remove the task at `index`; later tasks move down by one.
    pub fn remove(&mut self, index: usize) -> Result<Task> {
        self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Task> {
        self.check_index(index)?;
        Ok(&mut self.tasks[index])
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(TodoError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
        }
    }
}

/// Trim task text, rejecting blank input.
pub fn validate_text(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(TodoError::EmptyText)
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> Database {
        Database {
            tasks: vec![
                Task::new("Buy milk", Priority::Low),
                Task::new("Finish report", Priority::High),
                Task::new("Water plants", Priority::Medium),
            ],
        }
    }

    #[test]
    fn add_appends_incomplete_task_at_end() {
        let mut db = sample();
        let idx = db.add("  Call the bank ", Priority::High).unwrap();
        assert_eq!(idx, 3);
        assert_eq!(db.len(), 4);
        assert_eq!(db.tasks[3], Task::new("Call the bank", Priority::High));
        assert_eq!(&db.tasks[..3], &sample().tasks[..]);
    }

    #[test]
    fn add_blank_text_is_rejected() {
        let mut db = sample();
        for blank in ["", "   ", "\t\n"] {
            assert!(matches!(db.add(blank, Priority::Low), Err(TodoError::EmptyText)));
        }
        assert_eq!(db, sample());
    }

    #[test]
    fn toggle_flips_only_target() {
        let mut db = sample();
        assert!(db.toggle(1).unwrap());
        let mut expected = sample();
        expected.tasks[1].completed = true;
        assert_eq!(db, expected);

        assert!(!db.toggle(1).unwrap());
        assert_eq!(db, sample());
    }

    #[test]
    fn toggle_out_of_range() {
        let mut db = sample();
        assert!(matches!(
            db.toggle(3),
            Err(TodoError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(db, sample());
    }

    #[test]
    fn edit_replaces_text_and_priority_only() {
        let mut db = sample();
        db.toggle(2).unwrap();
        db.edit(2, " Water the garden ", Priority::High).unwrap();

        let mut expected = sample();
        expected.tasks[2] = Task {
            text: "Water the garden".into(),
            priority: Priority::High,
            completed: true,
        };
        assert_eq!(db, expected);
    }

    #[test]
    fn edit_with_blank_text_leaves_task_unchanged() {
        let mut db = sample();
        assert!(matches!(db.edit(0, "  ", Priority::High), Err(TodoError::EmptyText)));
        assert_eq!(db, sample());
    }

    #[test]
    fn remove_shifts_later_tasks_down() {
        let mut db = sample();
        let removed = db.remove(0).unwrap();
        assert_eq!(removed.text, "Buy milk");
        assert_eq!(db.len(), 2);
        assert_eq!(db.tasks[0].text, "Finish report");
        assert_eq!(db.tasks[1].text, "Water plants");
        assert!(db.remove(2).is_err());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let mut db = sample();
        db.toggle(1).unwrap();
        db.save(&path).unwrap();
        assert_eq!(Database::load(&path), db);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        sample().save(&path).unwrap();
        Database::default().save(&path).unwrap();
        assert!(Database::load(&path).is_empty());
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("tasks.json");
        sample().save(&path).unwrap();
        assert_eq!(Database::load(&path), sample());
    }

    #[test]
    fn file_is_a_plain_json_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let mut db = Database::default();
        db.add("Buy milk", Priority::Low).unwrap();
        db.save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!([{"task": "Buy milk", "priority": "Low", "completed": false}])
        );
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(Database::load(&dir.path().join("absent.json")).is_empty());
    }

    #[test]
    fn load_unparseable_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        for junk in [
            "not json",
            "{\"task\": \"x\"}",
            "[{\"task\": \"x\", \"priority\": \"Urgent\", \"completed\": false}]",
            "",
        ] {
            fs::write(&path, junk).unwrap();
            assert!(Database::load(&path).is_empty(), "content: {junk:?}");
        }
    }

    #[test]
    fn load_reads_compact_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"[{"task": "Buy milk", "priority": "Low", "completed": true}]"#,
        )
        .unwrap();
        let db = Database::load(&path);
        assert_eq!(
            db.tasks,
            vec![Task {
                text: "Buy milk".into(),
                priority: Priority::Low,
                completed: true,
            }]
        );
    }
}
