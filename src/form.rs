use crate::models::{Category, Sound};
use crate::parser::parse_task_input;
use crate::store::{ReminderStore, TaskStore, ValidationError};

pub const DEFAULT_DURATION: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskField {
    Title,
    Time,
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReminderField {
    Text,
    Time,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub time: String,
    pub duration: String,
    // None until picked, so a #tag in the title can still decide
    pub category: Option<Category>,
    pub active: TaskField,
}

impl Default for TaskDraft {
    fn default() -> Self {
        TaskDraft {
            title: String::new(),
            time: String::new(),
            duration: String::new(),
            category: None,
            active: TaskField::Title,
        }
    }
}

impl TaskDraft {
    pub fn next_field(&mut self) {
        self.active = match self.active {
            TaskField::Title => TaskField::Time,
            TaskField::Time => TaskField::Duration,
            TaskField::Duration => TaskField::Title,
        };
    }

    pub fn active_text_mut(&mut self) -> &mut String {
        match self.active {
            TaskField::Title => &mut self.title,
            TaskField::Time => &mut self.time,
            TaskField::Duration => &mut self.duration,
        }
    }

    pub fn cycle_category(&mut self) {
        self.category = Some(match self.category {
            None => Category::default(),
            Some(c) => c.next(),
        });
    }

    /// Merges the quick-add tokens of the title with the explicit fields and
    /// appends the task. Explicit fields take precedence over tokens.
    pub fn submit(&self, store: &mut TaskStore) -> Result<u64, ValidationError> {
        let parsed = parse_task_input(&self.title);

        let time = if self.time.trim().is_empty() {
            parsed.time.unwrap_or_default()
        } else {
            self.time.clone()
        };

        let duration = match self.duration.trim() {
            "" => match parsed.duration {
                None => DEFAULT_DURATION,
                Some(Ok(d)) => d,
                Some(Err(raw)) => return Err(ValidationError::InvalidDuration(raw)),
            },
            raw => raw
                .parse::<u32>()
                .map_err(|_| ValidationError::InvalidDuration(raw.to_string()))?,
        };

        let category = self
            .category
            .or(parsed.category)
            .unwrap_or_default();

        store
            .add_task(&parsed.title, &time, duration, category)
            .map(|task| task.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReminderDraft {
    pub text: String,
    pub time: String,
    pub sound: Sound,
    pub vibration: bool,
    pub active: ReminderField,
}

impl Default for ReminderDraft {
    fn default() -> Self {
        ReminderDraft {
            text: String::new(),
            time: String::new(),
            sound: Sound::default(),
            vibration: true,
            active: ReminderField::Text,
        }
    }
}

impl ReminderDraft {
    pub fn next_field(&mut self) {
        self.active = match self.active {
            ReminderField::Text => ReminderField::Time,
            ReminderField::Time => ReminderField::Text,
        };
    }

    pub fn active_text_mut(&mut self) -> &mut String {
        match self.active {
            ReminderField::Text => &mut self.text,
            ReminderField::Time => &mut self.time,
        }
    }

    pub fn submit(&self, store: &mut ReminderStore) -> Result<u64, ValidationError> {
        store
            .add_reminder(&self.text, &self.time, self.sound, self.vibration)
            .map(|reminder| reminder.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Form {
    Task(TaskDraft),
    Reminder(ReminderDraft),
}

impl Form {
    pub fn next_field(&mut self) {
        match self {
            Form::Task(draft) => draft.next_field(),
            Form::Reminder(draft) => draft.next_field(),
        }
    }

    pub fn active_text_mut(&mut self) -> &mut String {
        match self {
            Form::Task(draft) => draft.active_text_mut(),
            Form::Reminder(draft) => draft.active_text_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::demo_tasks;

    fn draft(title: &str, time: &str, duration: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            time: time.to_string(),
            duration: duration.to_string(),
            ..TaskDraft::default()
        }
    }

    #[test]
    fn test_tokens_fill_empty_fields() {
        let mut store = TaskStore::new(demo_tasks());
        let id = draft("Yoga @07:30 ~20 #wellness", "", "")
            .submit(&mut store)
            .unwrap();

        let task = store.get(id).unwrap();
        assert_eq!(task.title, "Yoga");
        assert_eq!(task.time, "07:30");
        assert_eq!(task.duration, 20);
        assert_eq!(task.category, Category::Wellness);
    }

    #[test]
    fn test_explicit_fields_win_over_tokens() {
        let mut store = TaskStore::default();
        let mut form = draft("Yoga @07:30 ~20 #learning", "08:00", "45");
        form.cycle_category();
        form.cycle_category();
        let id = form.submit(&mut store).unwrap();

        let task = store.get(id).unwrap();
        assert_eq!(task.time, "08:00");
        assert_eq!(task.duration, 45);
        assert_eq!(task.category, Category::Wellness);
    }

    #[test]
    fn test_default_duration_and_category() {
        let mut store = TaskStore::default();
        let id = draft("Inbox zero", "09:00", "").submit(&mut store).unwrap();

        let task = store.get(id).unwrap();
        assert_eq!(task.duration, DEFAULT_DURATION);
        assert_eq!(task.category, Category::Work);
    }

    #[test]
    fn test_invalid_duration_leaves_store_unchanged() {
        let mut store = TaskStore::default();
        let err = draft("Inbox zero", "09:00", "soon")
            .submit(&mut store)
            .unwrap_err();

        assert_eq!(err, ValidationError::InvalidDuration("soon".to_string()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_title_of_only_tokens_is_empty() {
        let mut store = TaskStore::default();
        let err = draft("@10:00 #work", "", "").submit(&mut store).unwrap_err();
        assert_eq!(err, ValidationError::EmptyTitle);
    }

    #[test]
    fn test_tab_cycles_text_fields() {
        let mut form = Form::Reminder(ReminderDraft::default());
        form.active_text_mut().push_str("Stretch");
        form.next_field();
        form.active_text_mut().push_str("18:00");
        form.next_field();

        match form {
            Form::Reminder(draft) => {
                assert_eq!(draft.text, "Stretch");
                assert_eq!(draft.time, "18:00");
                assert_eq!(draft.active, ReminderField::Text);
            }
            Form::Task(_) => unreachable!(),
        }
    }

    #[test]
    fn test_zero_duration_token_is_rejected() {
        let mut store = TaskStore::default();
        let err = draft("Nap ~0 @10:00", "", "").submit(&mut store).unwrap_err();

        assert_eq!(err, ValidationError::ZeroDuration);
        assert!(store.is_empty());
    }

    #[test]
    fn test_oversized_duration_token_is_rejected() {
        let mut store = TaskStore::default();
        let err = draft("Nap ~99999999999 @10:00", "", "")
            .submit(&mut store)
            .unwrap_err();

        assert_eq!(
            err,
            ValidationError::InvalidDuration("99999999999".to_string())
        );
        assert!(store.is_empty());
    }
}
