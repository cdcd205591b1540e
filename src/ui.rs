use crate::api::AdviceClient;
use crate::app::{App, InputMode, StatusKind, Tab, HOME_REMINDERS, HOME_TASKS};
use crate::form::{Form, ReminderField, TaskField};
use crate::models::{Category, Sound, Task, ADVICE_TIPS, TIP_OF_THE_DAY};
use chrono::Local;
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

fn centered_rect_absolute(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length((r.height.saturating_sub(height)) / 2),
                Constraint::Length(height),
                Constraint::Length((r.height.saturating_sub(height) + 1) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Length((r.width.saturating_sub(width)) / 2),
                Constraint::Length(width),
                Constraint::Length((r.width.saturating_sub(width) + 1) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Work => Color::Blue,
        Category::Wellness => Color::Magenta,
        Category::Learning => Color::Yellow,
        Category::Break => Color::Cyan,
    }
}

fn key_hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Red)),
        Span::raw(label),
    ]
}

fn get_legend(app: &App) -> Text<'static> {
    let hints: Vec<[Span<'static>; 2]> = match app.input_mode {
        InputMode::Normal => {
            let mut hints = vec![
                key_hint(" q ", ": Quit "),
                key_hint(" Tab ", ": Next Tab "),
                key_hint(" j ", ": Down "),
                key_hint(" k ", ": Up "),
            ];
            match app.tab {
                Tab::Home | Tab::Schedule => {
                    hints.push(key_hint(" Enter ", ": Toggle Done "));
                    hints.push(key_hint(" a ", ": Add Task "));
                }
                Tab::Reminders => hints.push(key_hint(" a ", ": Add Reminder ")),
                Tab::Advice => {
                    hints.push(key_hint(" i ", ": Describe Situation "));
                    hints.push(key_hint(" Enter ", ": Get Advice "));
                }
                Tab::Profile => hints.push(key_hint(" Enter ", ": Toggle Setting ")),
                Tab::Progress => {}
            }
            hints
        }
        InputMode::Editing => {
            let mut hints = vec![
                key_hint(" i ", ": Insert "),
                key_hint(" Tab ", ": Next Field "),
            ];
            match app.form {
                Some(Form::Task(_)) => hints.push(key_hint(" c ", ": Category ")),
                Some(Form::Reminder(_)) => {
                    hints.push(key_hint(" s ", ": Sound "));
                    hints.push(key_hint(" v ", ": Vibration "));
                }
                None => {}
            }
            hints.push(key_hint(" Enter ", ": Submit "));
            hints.push(key_hint(" Esc ", ": Cancel "));
            hints
        }
        InputMode::Insert => vec![
            key_hint(" Esc ", ": Stop Typing "),
            key_hint(" Backspace ", ": Delete "),
        ],
    };
    Text::from(Line::from(hints.into_iter().flatten().collect::<Vec<_>>()))
}

fn task_line(task: &Task) -> Line<'static> {
    let (marker, title_style) = if task.completed {
        (
            Span::styled("[x] ", Style::default().fg(Color::Green)),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        (Span::raw("[ ] "), Style::default())
    };
    Line::from(vec![
        marker,
        Span::styled(task.title.clone(), title_style),
        Span::styled(
            format!("  {} • {} min ", task.time, task.duration),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!(" {} ", task.category),
            Style::default()
                .bg(category_color(task.category))
                .fg(Color::Black),
        ),
    ])
}

fn highlighted(list: List<'static>) -> List<'static> {
    list.highlight_style(
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol(">> ")
}

fn progress_gauge(app: &App, title: &'static str) -> Gauge<'static> {
    let summary = app.progress();
    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(summary.percentage().round() as u16)
        .label(format!(
            "{} of {} tasks done",
            summary.completed, summary.total
        ))
}

fn draw_home(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(HOME_TASKS as u16 + 2),
                Constraint::Min(4),
                Constraint::Length(HOME_REMINDERS as u16 + 2),
            ]
            .as_ref(),
        )
        .split(area);

    f.render_widget(progress_gauge(app, "Today's progress"), chunks[0]);

    let tasks: Vec<ListItem> = app
        .tasks
        .iter()
        .take(HOME_TASKS)
        .map(|task| ListItem::new(task_line(task)))
        .collect();
    let tasks_widget = if tasks.is_empty() {
        List::new(vec![ListItem::new("Nothing planned yet")])
    } else {
        highlighted(List::new(tasks))
    };
    let tasks_widget = tasks_widget.block(Block::default().borders(Borders::ALL).title("Up next"));
    f.render_stateful_widget(tasks_widget, chunks[1], &mut app.state);

    let tip = Paragraph::new(vec![
        Line::from(Span::styled(
            TIP_OF_THE_DAY.title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(TIP_OF_THE_DAY.description),
    ])
    .block(Block::default().borders(Borders::ALL).title("Tip of the day"))
    .wrap(Wrap { trim: true });
    f.render_widget(tip, chunks[2]);

    let reminders: Vec<ListItem> = app
        .reminders
        .upcoming(HOME_REMINDERS)
        .iter()
        .map(|r| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", r.time), Style::default().fg(Color::Gray)),
                Span::raw(r.text.clone()),
                Span::styled(format!("  ♪ {}", r.sound), Style::default().fg(Color::Cyan)),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(reminders).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Upcoming reminders"),
        ),
        chunks[3],
    );
}

fn draw_schedule(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Today's schedule");
    let tasks_widget = if !app.tasks.is_empty() {
        let tasks: Vec<ListItem> = app
            .tasks
            .iter()
            .map(|task| ListItem::new(task_line(task)))
            .collect();
        highlighted(List::new(tasks))
    } else {
        List::new(vec![ListItem::new("No tasks yet, press 'a' to add one")])
    };
    f.render_stateful_widget(tasks_widget.block(block), area, &mut app.state);
}

fn draw_reminders(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(area);

    let reminders: Vec<ListItem> = app
        .reminders
        .iter()
        .map(|r| {
            let vibration = if r.vibration { "on" } else { "off" };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", r.time), Style::default().fg(Color::Gray)),
                Span::styled(r.text.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  sound: {}  vibration: {}", r.sound, vibration)),
            ]))
        })
        .collect();
    let list = if app.reminders.is_empty() {
        List::new(vec![ListItem::new("No reminders yet, press 'a' to add one")])
    } else {
        highlighted(List::new(reminders))
    };
    let list = list.block(Block::default().borders(Borders::ALL).title("My reminders"));
    f.render_stateful_widget(list, chunks[0], &mut app.state);

    let sounds: Vec<String> = Sound::ALL.iter().map(|s| s.to_string()).collect();
    let sounds = Paragraph::new(sounds.join("  "))
        .block(Block::default().borders(Borders::ALL).title("Available sounds"));
    f.render_widget(sounds, chunks[1]);
}

fn draw_advice(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(ADVICE_TIPS.len() as u16 * 2 + 2),
                Constraint::Length(5),
                Constraint::Min(3),
            ]
            .as_ref(),
        )
        .split(area);

    let mut tips: Vec<Line<'static>> = Vec::new();
    for tip in ADVICE_TIPS.iter() {
        tips.push(Line::from(Span::styled(
            tip.title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        tips.push(Line::from(tip.description));
    }
    f.render_widget(
        Paragraph::new(tips)
            .block(Block::default().borders(Borders::ALL).title("Techniques"))
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let typing = matches!(app.input_mode, InputMode::Insert) && app.form.is_none();
    let input_style = if typing {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let situation = if app.advice.situation.is_empty() && !typing {
        Text::styled(
            "e.g. I haven't been able to focus on work for two hours...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Text::from(app.advice.situation.as_str())
    };
    f.render_widget(
        Paragraph::new(situation)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Describe your situation")
                    .style(input_style),
            )
            .wrap(Wrap { trim: false }),
        chunks[1],
    );

    let answer = if app.advice.loading {
        Text::styled("Thinking...", Style::default().fg(Color::Yellow))
    } else if let Some(error) = &app.advice.error {
        Text::styled(error.as_str(), Style::default().fg(Color::Red))
    } else if let Some(advice) = &app.advice.advice {
        Text::from(advice.as_str())
    } else {
        Text::styled("Press Enter to ask for advice", Style::default().fg(Color::DarkGray))
    };
    f.render_widget(
        Paragraph::new(answer)
            .block(Block::default().borders(Borders::ALL).title("Advice"))
            .wrap(Wrap { trim: true }),
        chunks[2],
    );
}

fn draw_progress(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    f.render_widget(progress_gauge(app, "Tasks done today"), chunks[0]);

    let a = &app.achievements;
    let stat = |value: String, label: &'static str| {
        Line::from(vec![
            Span::styled(
                format!("{:>6} ", value),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(label),
        ])
    };
    let stats = Paragraph::new(vec![
        stat(a.streak_days.to_string(), "days in a row"),
        stat(a.tasks_this_week.to_string(), "tasks this week"),
        stat(format!("{:.1}", a.focus_hours), "hours of focus"),
        stat(a.tips_applied.to_string(), "tips applied"),
    ])
    .block(Block::default().borders(Borders::ALL).title("Your achievements"));
    f.render_widget(stats, chunks[1]);

    let badges: Vec<ListItem> = a
        .badges
        .iter()
        .map(|badge| {
            if badge.unlocked {
                ListItem::new(Span::styled(
                    format!("★ {}", badge.title),
                    Style::default().fg(Color::Yellow),
                ))
            } else {
                ListItem::new(Span::styled(
                    format!("☆ {}", badge.title),
                    Style::default().fg(Color::DarkGray),
                ))
            }
        })
        .collect();
    let title = format!(
        "Badges ({}/{})",
        a.unlocked_count(),
        a.badges.len()
    );
    f.render_widget(
        List::new(badges).block(Block::default().borders(Borders::ALL).title(title)),
        chunks[2],
    );
}

fn draw_profile(f: &mut Frame, app: &mut App, area: Rect) {
    let settings: Vec<ListItem> = app
        .settings
        .values()
        .iter()
        .zip(crate::models::NotificationSettings::LABELS.iter())
        .map(|(on, label)| {
            let (mark, color) = if *on {
                ("[on]  ", Color::Green)
            } else {
                ("[off] ", Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(color)),
                Span::raw(*label),
            ]))
        })
        .collect();
    f.render_stateful_widget(
        highlighted(List::new(settings)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Notification settings"),
        ),
        area,
        &mut app.state,
    );
}

fn form_field(label: &'static str, value: String, active: bool) -> Line<'static> {
    let label_style = if active {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    Line::from(vec![Span::styled(label, label_style), Span::raw(value)])
}

fn draw_form(f: &mut Frame, form: &Form, area: Rect) {
    let (title, lines) = match form {
        Form::Task(draft) => {
            let category = match draft.category {
                Some(c) => c.to_string(),
                None => "from #tag or work".to_string(),
            };
            (
                "New Task (Enter to Submit)",
                vec![
                    form_field("Title:    ", draft.title.clone(), draft.active == TaskField::Title),
                    form_field("Time:     ", draft.time.clone(), draft.active == TaskField::Time),
                    form_field(
                        "Minutes:  ",
                        draft.duration.clone(),
                        draft.active == TaskField::Duration,
                    ),
                    form_field("Category: ", category, false),
                ],
            )
        }
        Form::Reminder(draft) => (
            "New Reminder (Enter to Submit)",
            vec![
                form_field("Text:      ", draft.text.clone(), draft.active == ReminderField::Text),
                form_field("Time:      ", draft.time.clone(), draft.active == ReminderField::Time),
                form_field("Sound:     ", draft.sound.to_string(), false),
                form_field(
                    "Vibration: ",
                    if draft.vibration { "on" } else { "off" }.to_string(),
                    false,
                ),
            ],
        ),
    };

    let popup_width = (area.width / 5 * 3).max(40).min(area.width);
    let popup_height = (lines.len() as u16 + 2).min(area.height);
    let popup_area = centered_rect_absolute(popup_width, popup_height, area);

    let popup_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Green));

    let input = Paragraph::new(lines)
        .style(Style::default().fg(Color::White))
        .block(popup_block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(input, popup_area);
}

fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    // Tabs, body and footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(size);

    let header = format!("FocusFlow  {}", Local::now().format("%H:%M"));
    let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title(header))
        .select(app.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    let body = chunks[1];
    match app.tab {
        Tab::Home => draw_home(f, app, body),
        Tab::Schedule => draw_schedule(f, app, body),
        Tab::Reminders => draw_reminders(f, app, body),
        Tab::Advice => draw_advice(f, app, body),
        Tab::Progress => draw_progress(f, app, body),
        Tab::Profile => draw_profile(f, app, body),
    }

    if let Some(form) = &app.form {
        draw_form(f, form, body);
    }

    let footer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)].as_ref())
        .split(chunks[2]);

    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => Color::Green,
            StatusKind::Error => Color::Red,
        };
        f.render_widget(
            Paragraph::new(status.text.as_str()).style(Style::default().fg(color)),
            footer[0],
        );
    }

    // Render the legend in the footer
    let legend = Paragraph::new(get_legend(app))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(legend, footer[1]);
}

pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    client: &AdviceClient,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, &mut app))?;

        // The frame above showed the loading state, now wait for the answer
        if app.advice.loading {
            app.resolve_advice(client).await;
            continue;
        }

        // Handle input
        if event::poll(Duration::from_millis(100))? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let should_quit = app.handle_input(key);
                if should_quit {
                    return Ok(());
                }
            }
        }
    }
}
