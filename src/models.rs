use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// Category of a task
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Work,
    Wellness,
    Learning,
    Break,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Work,
        Category::Wellness,
        Category::Learning,
        Category::Break,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Wellness => "wellness",
            Category::Learning => "learning",
            Category::Break => "break",
        }
    }

    pub fn next(self) -> Category {
        let i = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

// Alert sound of a reminder
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sound {
    #[default]
    Gentle,
    Water,
    Calm,
    Bird,
    Wind,
    Chime,
}

impl Sound {
    pub const ALL: [Sound; 6] = [
        Sound::Gentle,
        Sound::Water,
        Sound::Calm,
        Sound::Bird,
        Sound::Wind,
        Sound::Chime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sound::Gentle => "gentle",
            Sound::Water => "water",
            Sound::Calm => "calm",
            Sound::Bird => "bird",
            Sound::Wind => "wind",
            Sound::Chime => "chime",
        }
    }

    pub fn next(self) -> Sound {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Task struct
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub time: String,
    pub duration: u32,
    pub completed: bool,
    pub category: Category,
}

// Reminder struct
#[derive(Clone, Debug, PartialEq)]
pub struct Reminder {
    pub id: u64,
    pub text: String,
    pub time: String,
    pub sound: Sound,
    pub vibration: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdviceTip {
    pub title: &'static str,
    pub description: &'static str,
}

pub const ADVICE_TIPS: [AdviceTip; 4] = [
    AdviceTip {
        title: "Pomodoro technique",
        description: "Work for 25 minutes, rest for 5. It helps you keep your focus.",
    },
    AdviceTip {
        title: "Breathing practice",
        description: "Take 5 deep breaths to calm your nervous system.",
    },
    AdviceTip {
        title: "Break the task down",
        description: "Big tasks can be split into small 10-minute steps.",
    },
    AdviceTip {
        title: "Move your body",
        description: "Every hour, take a 2-minute stretch to keep your concentration.",
    },
];

pub const TIP_OF_THE_DAY: AdviceTip = AdviceTip {
    title: "The 5-4-3-2-1 grounding technique",
    description: "When you feel overloaded, name 5 things you see, 4 sounds, 3 things you touch, \
                  2 smells and 1 taste. It brings you back to the present moment.",
};

#[derive(Clone, Debug, PartialEq)]
pub struct NotificationSettings {
    pub push: bool,
    pub sound: bool,
    pub vibration: bool,
    pub daily_reminders: bool,
    pub advice_tips: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            push: true,
            sound: true,
            vibration: true,
            daily_reminders: true,
            advice_tips: true,
        }
    }
}

impl NotificationSettings {
    pub const LABELS: [&'static str; 5] = [
        "Push notifications",
        "Sound alerts",
        "Vibration",
        "Daily reminders",
        "Advice tips",
    ];

    pub fn values(&self) -> [bool; 5] {
        [
            self.push,
            self.sound,
            self.vibration,
            self.daily_reminders,
            self.advice_tips,
        ]
    }

    pub fn toggle(&mut self, index: usize) {
        let flag = match index {
            0 => &mut self.push,
            1 => &mut self.sound,
            2 => &mut self.vibration,
            3 => &mut self.daily_reminders,
            4 => &mut self.advice_tips,
            _ => return,
        };
        *flag = !*flag;
    }
}

pub fn demo_tasks() -> Vec<Task> {
    let task = |id, title: &str, time: &str, duration, completed, category| Task {
        id,
        title: title.to_string(),
        time: time.to_string(),
        duration,
        completed,
        category,
    };
    vec![
        task(1, "Morning meditation", "08:00", 15, true, Category::Wellness),
        task(2, "Work on the project", "10:00", 90, false, Category::Work),
        task(3, "Break and a walk", "12:00", 30, false, Category::Break),
        task(4, "Study session", "14:00", 60, false, Category::Learning),
    ]
}

pub fn demo_reminders() -> Vec<Reminder> {
    let reminder = |id, text: &str, time: &str, sound, vibration| Reminder {
        id,
        text: text.to_string(),
        time: time.to_string(),
        sound,
        vibration,
    };
    vec![
        reminder(1, "Time to take a break!", "11:30", Sound::Gentle, true),
        reminder(2, "Don't forget to drink water", "13:00", Sound::Water, false),
        reminder(3, "Time for breathing exercises", "16:00", Sound::Calm, true),
    ]
}
