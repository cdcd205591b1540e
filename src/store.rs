use crate::models::{Category, Reminder, Sound, Task};
use chrono::Utc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Task title cannot be empty.")]
    EmptyTitle,
    #[error("Time cannot be empty.")]
    EmptyTime,
    #[error("Reminder text cannot be empty.")]
    EmptyText,
    #[error("Duration must be at least one minute.")]
    ZeroDuration,
    #[error("Duration must be a number of minutes, got '{0}'.")]
    InvalidDuration(String),
}

/// Hands out ids derived from the wall clock in milliseconds.
///
/// Two ids created within the same millisecond (or after the clock steps
/// back) still come out strictly increasing.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn starting_after(last: u64) -> IdGenerator {
        IdGenerator { last }
    }

    pub fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last = now.max(self.last + 1);
        self.last
    }
}

#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    ids: IdGenerator,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> TaskStore {
        let last = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        TaskStore {
            tasks,
            ids: IdGenerator::starting_after(last),
        }
    }

    pub fn toggle_completion(&mut self, id: u64) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        debug!(id, completed = task.completed, "toggled task");
        Some(task.completed)
    }

    pub fn add_task(
        &mut self,
        title: &str,
        time: &str,
        duration: u32,
        category: Category,
    ) -> Result<&Task, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if time.trim().is_empty() {
            return Err(ValidationError::EmptyTime);
        }
        if duration == 0 {
            return Err(ValidationError::ZeroDuration);
        }

        let task = Task {
            id: self.ids.next_id(),
            title: title.trim().to_string(),
            time: time.trim().to_string(),
            duration,
            completed: false,
            category,
        };
        debug!(id = task.id, category = %task.category, "added task");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

#[derive(Debug, Default)]
pub struct ReminderStore {
    reminders: Vec<Reminder>,
    ids: IdGenerator,
}

impl ReminderStore {
    pub fn new(reminders: Vec<Reminder>) -> ReminderStore {
        let last = reminders.iter().map(|r| r.id).max().unwrap_or(0);
        ReminderStore {
            reminders,
            ids: IdGenerator::starting_after(last),
        }
    }

    pub fn add_reminder(
        &mut self,
        text: &str,
        time: &str,
        sound: Sound,
        vibration: bool,
    ) -> Result<&Reminder, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        if time.trim().is_empty() {
            return Err(ValidationError::EmptyTime);
        }

        let reminder = Reminder {
            id: self.ids.next_id(),
            text: text.trim().to_string(),
            time: time.trim().to_string(),
            sound,
            vibration,
        };
        debug!(id = reminder.id, sound = %reminder.sound, "added reminder");
        self.reminders.push(reminder);
        Ok(&self.reminders[self.reminders.len() - 1])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reminder> {
        self.reminders.iter()
    }

    pub fn upcoming(&self, n: usize) -> &[Reminder] {
        &self.reminders[..n.min(self.reminders.len())]
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }
}
