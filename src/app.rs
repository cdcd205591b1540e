use crate::api::{AdviceClient, AdviceError};
use crate::config::Config;
use crate::form::{Form, ReminderDraft, TaskDraft};
use crate::models::{demo_reminders, demo_tasks, NotificationSettings};
use crate::progress::{Achievements, ProgressSummary};
use crate::store::{ReminderStore, TaskStore};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;
use tracing::{info, warn};

// Number of tasks the home tab lists
pub const HOME_TASKS: usize = 3;
pub const HOME_REMINDERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Home,
    Schedule,
    Reminders,
    Advice,
    Progress,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Home,
        Tab::Schedule,
        Tab::Reminders,
        Tab::Advice,
        Tab::Progress,
        Tab::Profile,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Schedule => "Schedule",
            Tab::Reminders => "Reminders",
            Tab::Advice => "Advice",
            Tab::Progress => "Progress",
            Tab::Profile => "Profile",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn offset(self, delta: isize) -> Tab {
        let len = Self::ALL.len() as isize;
        let i = (self.index() as isize + delta).rem_euclid(len);
        Self::ALL[i as usize]
    }
}

pub enum InputMode {
    Normal,
    Editing,
    Insert,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct AdviceState {
    pub situation: String,
    pub loading: bool,
    pub advice: Option<String>,
    pub error: Option<String>,
}

pub struct App {
    pub tasks: TaskStore,
    pub reminders: ReminderStore,
    pub advice: AdviceState,
    pub achievements: Achievements,
    pub settings: NotificationSettings,
    pub tab: Tab,
    pub state: ListState,
    pub input_mode: InputMode,
    pub form: Option<Form>,
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(tasks: TaskStore, reminders: ReminderStore) -> App {
        let mut app = App {
            tasks,
            reminders,
            advice: AdviceState::default(),
            achievements: Achievements::default(),
            settings: NotificationSettings::default(),
            tab: Tab::Home,
            state: ListState::default(),
            input_mode: InputMode::Normal,
            form: None,
            status: None,
        };
        app.reset_selection();
        app
    }

    pub fn from_config(config: &Config) -> App {
        if config.seed_demo_data {
            App::new(
                TaskStore::new(demo_tasks()),
                ReminderStore::new(demo_reminders()),
            )
        } else {
            App::new(TaskStore::default(), ReminderStore::default())
        }
    }

    pub fn progress(&self) -> ProgressSummary {
        ProgressSummary::from_tasks(&self.tasks)
    }

    // Length of the selectable list on the current tab
    fn list_len(&self) -> usize {
        match self.tab {
            Tab::Home => self.tasks.len().min(HOME_TASKS),
            Tab::Schedule => self.tasks.len(),
            Tab::Reminders => self.reminders.len(),
            Tab::Profile => NotificationSettings::LABELS.len(),
            Tab::Advice | Tab::Progress => 0,
        }
    }

    fn reset_selection(&mut self) {
        if self.list_len() > 0 {
            self.state.select(Some(0));
        } else {
            self.state.select(None);
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.reset_selection();
    }

    pub fn next(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }

    pub fn toggle_selected(&mut self) {
        let Some(selected) = self.state.selected() else {
            return;
        };
        match self.tab {
            Tab::Home | Tab::Schedule => {
                let id = self.tasks.iter().nth(selected).map(|t| t.id);
                if let Some(id) = id {
                    self.tasks.toggle_completion(id);
                }
            }
            Tab::Profile => self.settings.toggle(selected),
            _ => {}
        }
    }

    pub fn open_form(&mut self, form: Form) {
        self.form = Some(form);
        self.input_mode = InputMode::Editing;
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn submit_form(&mut self) {
        let result = match &self.form {
            Some(Form::Task(draft)) => draft.submit(&mut self.tasks).map(|id| {
                let title = self.tasks.get(id).map_or("", |t| t.title.as_str());
                format!("Added task '{}'", title)
            }),
            Some(Form::Reminder(draft)) => draft
                .submit(&mut self.reminders)
                .map(|_| "Reminder created".to_string()),
            None => return,
        };

        match result {
            Ok(message) => {
                info!("{}", message);
                self.set_status(StatusKind::Info, message);
                self.close_form();
                self.reset_selection();
            }
            Err(err) => {
                warn!(error = %err, "form rejected");
                self.set_status(StatusKind::Error, err.to_string());
            }
        }
    }

    /// Marks the advice request as pending. The event loop draws once with
    /// the loading flag set and then calls [`App::resolve_advice`].
    pub fn begin_advice_request(&mut self) {
        if self.advice.loading {
            return;
        }
        if self.advice.situation.trim().is_empty() {
            let message = AdviceError::EmptySituation.to_string();
            self.advice.error = Some(message.clone());
            self.set_status(StatusKind::Error, message);
            return;
        }
        self.advice.loading = true;
        self.advice.error = None;
        self.set_status(StatusKind::Info, "Asking for advice...");
    }

    pub async fn resolve_advice(&mut self, client: &AdviceClient) {
        if !self.advice.loading {
            return;
        }
        let result = client.request_advice(&self.advice.situation).await;
        self.advice.loading = false;

        match result {
            Ok(advice) => {
                info!("advice received");
                self.advice.advice = Some(advice);
                self.advice.error = None;
                self.set_status(StatusKind::Info, "Here is your advice");
            }
            Err(err) => {
                match &err {
                    AdviceError::Remote { status, .. } => {
                        warn!(%status, error = %err, "advice service refused the request")
                    }
                    _ => warn!(error = ?err, "advice request failed"),
                }
                let message = err.to_string();
                self.advice.error = Some(message.clone());
                self.set_status(StatusKind::Error, message);
            }
        }
    }

    // Text field receiving keystrokes in insert mode
    fn active_text_mut(&mut self) -> Option<&mut String> {
        match &mut self.form {
            Some(form) => Some(form.active_text_mut()),
            None if self.tab == Tab::Advice => Some(&mut self.advice.situation),
            None => None,
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match self.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return true,
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                    self.select_tab(self.tab.offset(1))
                }
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                    self.select_tab(self.tab.offset(-1))
                }
                KeyCode::Char(c @ '1'..='6') => {
                    let i = c as usize - '1' as usize;
                    self.select_tab(Tab::ALL[i]);
                }
                KeyCode::Char('j') | KeyCode::Down => self.next(),
                KeyCode::Char('k') | KeyCode::Up => self.previous(),
                KeyCode::Char(' ') => self.toggle_selected(),
                KeyCode::Enter => {
                    if self.tab == Tab::Advice {
                        self.begin_advice_request();
                    } else {
                        self.toggle_selected();
                    }
                }
                KeyCode::Char('a') => match self.tab {
                    Tab::Home | Tab::Schedule => self.open_form(Form::Task(TaskDraft::default())),
                    Tab::Reminders => self.open_form(Form::Reminder(ReminderDraft::default())),
                    _ => {}
                },
                KeyCode::Char('i') if self.tab == Tab::Advice => {
                    self.input_mode = InputMode::Insert;
                }
                KeyCode::Esc => self.status = None,
                _ => {}
            },

            InputMode::Editing => match key.code {
                KeyCode::Char('i') => {
                    self.input_mode = InputMode::Insert;
                }
                KeyCode::Tab => {
                    if let Some(form) = &mut self.form {
                        form.next_field();
                    }
                }
                KeyCode::Char('c') => {
                    if let Some(Form::Task(draft)) = &mut self.form {
                        draft.cycle_category();
                    }
                }
                KeyCode::Char('s') => {
                    if let Some(Form::Reminder(draft)) = &mut self.form {
                        draft.sound = draft.sound.next();
                    }
                }
                KeyCode::Char('v') => {
                    if let Some(Form::Reminder(draft)) = &mut self.form {
                        draft.vibration = !draft.vibration;
                    }
                }
                KeyCode::Enter => self.submit_form(),
                KeyCode::Esc => self.close_form(),
                _ => {}
            },

            InputMode::Insert => match key.code {
                KeyCode::Char(c) => {
                    if let Some(text) = self.active_text_mut() {
                        text.push(c);
                    }
                }
                KeyCode::Backspace => {
                    if let Some(text) = self.active_text_mut() {
                        text.pop();
                    }
                }
                KeyCode::Enter if self.form.is_none() => {
                    self.input_mode = InputMode::Normal;
                    self.begin_advice_request();
                }
                KeyCode::Esc => {
                    self.input_mode = if self.form.is_some() {
                        InputMode::Editing
                    } else {
                        InputMode::Normal
                    };
                }
                _ => {}
            },
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_input(key(KeyCode::Char(c)));
        }
    }

    fn demo_app() -> App {
        App::from_config(&Config::default())
    }

    #[test]
    fn test_quit() {
        let mut app = demo_app();
        assert!(app.handle_input(key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_tab_navigation_wraps() {
        let mut app = demo_app();
        app.handle_input(key(KeyCode::BackTab));
        assert_eq!(app.tab, Tab::Profile);
        app.handle_input(key(KeyCode::Tab));
        assert_eq!(app.tab, Tab::Home);
        app.handle_input(key(KeyCode::Char('4')));
        assert_eq!(app.tab, Tab::Advice);
        assert_eq!(app.state.selected(), None);
    }

    #[test]
    fn test_toggle_from_schedule() {
        let mut app = demo_app();
        app.select_tab(Tab::Schedule);
        app.handle_input(key(KeyCode::Char('j')));
        app.handle_input(key(KeyCode::Enter));
        assert_eq!(app.progress().completed, 2);

        app.handle_input(key(KeyCode::Char(' ')));
        assert_eq!(app.progress().completed, 1);
    }

    #[test]
    fn test_home_selection_is_limited() {
        let mut app = demo_app();
        for _ in 0..HOME_TASKS {
            app.handle_input(key(KeyCode::Char('j')));
        }
        assert_eq!(app.state.selected(), Some(0));
    }

    #[test]
    fn test_add_task_through_form() {
        let mut app = demo_app();
        app.select_tab(Tab::Schedule);
        app.handle_input(key(KeyCode::Char('a')));
        app.handle_input(key(KeyCode::Char('i')));
        type_text(&mut app, "Read a book @21:00 ~40 #learning");
        app.handle_input(key(KeyCode::Esc));
        app.handle_input(key(KeyCode::Enter));

        assert!(app.form.is_none());
        assert_eq!(app.tasks.len(), 5);
        let task = app.tasks.iter().last().unwrap();
        assert_eq!(task.title, "Read a book");
        assert!(!task.completed);
        assert_eq!(
            app.status.as_ref().map(|s| s.kind),
            Some(StatusKind::Info)
        );
    }

    #[test]
    fn test_rejected_form_stays_open() {
        let mut app = demo_app();
        app.select_tab(Tab::Schedule);
        app.handle_input(key(KeyCode::Char('a')));
        app.handle_input(key(KeyCode::Char('i')));
        type_text(&mut app, "No time given");
        app.handle_input(key(KeyCode::Esc));
        app.handle_input(key(KeyCode::Enter));

        assert!(app.form.is_some());
        assert_eq!(app.tasks.len(), 4);
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Time cannot be empty.");
    }

    #[test]
    fn test_add_reminder_through_form() {
        let mut app = demo_app();
        app.select_tab(Tab::Reminders);
        app.handle_input(key(KeyCode::Char('a')));
        app.handle_input(key(KeyCode::Char('i')));
        type_text(&mut app, "Stretch");
        app.handle_input(key(KeyCode::Esc));
        app.handle_input(key(KeyCode::Tab));
        app.handle_input(key(KeyCode::Char('i')));
        type_text(&mut app, "18:00");
        app.handle_input(key(KeyCode::Esc));
        app.handle_input(key(KeyCode::Char('s')));
        app.handle_input(key(KeyCode::Char('v')));
        app.handle_input(key(KeyCode::Enter));

        assert_eq!(app.reminders.len(), 4);
        let reminder = app.reminders.iter().last().unwrap();
        assert_eq!(reminder.text, "Stretch");
        assert_eq!(reminder.time, "18:00");
        assert_eq!(reminder.sound, crate::models::Sound::Water);
        assert!(!reminder.vibration);
    }

    #[test]
    fn test_blank_situation_does_not_load() {
        let mut app = demo_app();
        app.select_tab(Tab::Advice);
        app.handle_input(key(KeyCode::Enter));

        assert!(!app.advice.loading);
        assert_eq!(
            app.advice.error.as_deref(),
            Some("Describe your situation first.")
        );
    }

    #[tokio::test]
    async fn test_advice_cycle_sets_and_clears_loading() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"advice": "Set a 10 minute timer."}"#)
            .create_async()
            .await;
        let client = AdviceClient::new(server.url());

        let mut app = demo_app();
        app.select_tab(Tab::Advice);
        app.handle_input(key(KeyCode::Char('i')));
        type_text(&mut app, "Stuck for two hours");
        app.handle_input(key(KeyCode::Enter));
        assert!(app.advice.loading);

        app.resolve_advice(&client).await;
        assert!(!app.advice.loading);
        assert_eq!(app.advice.advice.as_deref(), Some("Set a 10 minute timer."));
        assert_eq!(app.advice.error, None);
    }

    #[tokio::test]
    async fn test_advice_failure_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(400)
            .with_body(r#"{"error": "Describe your situation"}"#)
            .create_async()
            .await;
        let client = AdviceClient::new(server.url());

        let mut app = demo_app();
        app.advice.situation = "help".to_string();
        app.begin_advice_request();
        app.resolve_advice(&client).await;

        assert!(!app.advice.loading);
        assert_eq!(app.advice.advice, None);
        let status = app.status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Describe your situation");
    }

    #[test]
    fn test_profile_toggles_settings() {
        let mut app = demo_app();
        app.select_tab(Tab::Profile);
        app.handle_input(key(KeyCode::Char('k')));
        app.handle_input(key(KeyCode::Enter));
        assert!(!app.settings.advice_tips);
    }

    #[test]
    fn test_empty_config_starts_empty() {
        let config = Config {
            seed_demo_data: false,
            ..Config::default()
        };
        let app = App::from_config(&config);
        assert!(app.tasks.is_empty());
        assert!(app.reminders.is_empty());
        assert_eq!(app.state.selected(), None);
    }
}
