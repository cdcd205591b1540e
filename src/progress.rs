use crate::store::TaskStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
}

impl ProgressSummary {
    pub fn from_tasks(tasks: &TaskStore) -> ProgressSummary {
        ProgressSummary {
            completed: tasks.completed_count(),
            total: tasks.len(),
        }
    }

    /// Share of completed tasks in `0.0..=100.0`, zero for an empty day.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 * 100.0 / self.total as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub title: &'static str,
    pub unlocked: bool,
}

// Fixed figures, nothing is tracked across sessions
#[derive(Debug, Clone, PartialEq)]
pub struct Achievements {
    pub streak_days: u32,
    pub tasks_this_week: u32,
    pub focus_hours: f32,
    pub tips_applied: u32,
    pub badges: Vec<Badge>,
}

impl Default for Achievements {
    fn default() -> Self {
        let badge = |title, unlocked| Badge { title, unlocked };
        Achievements {
            streak_days: 7,
            tasks_this_week: 42,
            focus_hours: 5.2,
            tips_applied: 12,
            badges: vec![
                badge("Week streak", true),
                badge("Quick start", true),
                badge("50 tasks", false),
                badge("Month of success", false),
                badge("Self care", true),
                badge("90% accuracy", false),
            ],
        }
    }
}

impl Achievements {
    pub fn unlocked_count(&self) -> usize {
        self.badges.iter().filter(|b| b.unlocked).count()
    }
}
