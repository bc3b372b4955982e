use std::num::IntErrorKind;

use crossterm::event::{KeyCode, KeyEvent};
use ideaforge_core::{Difficulty, GenerationRequest, ProjectMode, DEFAULT_IDEA_COUNT};

const MAX_DAY_DIGITS: usize = 4;

/// Form rows in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Domain,
    Audience,
    Difficulty,
    TimeDays,
    Skills,
    Mode,
    Constraints,
    Submit,
}

impl Field {
    pub const ALL: &[Field] = &[
        Field::Domain,
        Field::Audience,
        Field::Difficulty,
        Field::TimeDays,
        Field::Skills,
        Field::Mode,
        Field::Constraints,
        Field::Submit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Domain => "Domain",
            Field::Audience => "Audience",
            Field::Difficulty => "Difficulty",
            Field::TimeDays => "Days available",
            Field::Skills => "Skills",
            Field::Mode => "Mode",
            Field::Constraints => "Constraints",
            Field::Submit => "Generate ideas",
        }
    }

    /// Whether the row accepts typed characters.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Field::Domain | Field::Audience | Field::TimeDays | Field::Skills | Field::Constraints
        )
    }

    fn index(&self) -> usize {
        Field::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    fn next(&self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    fn prev(&self) -> Field {
        let len = Field::ALL.len();
        Field::ALL[(self.index() + len - 1) % len]
    }
}

/// What the caller should do after the form consumed a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
}

#[derive(Debug, Clone)]
pub struct ProjectForm {
    pub domain: String,
    pub audience: String,
    pub difficulty: Difficulty,
    pub time_days: String,
    pub skills: String,
    pub mode: ProjectMode,
    pub constraints: String,
    focus: Field,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            domain: String::new(),
            audience: String::new(),
            difficulty: Difficulty::Beginner,
            time_days: "7".into(),
            skills: String::new(),
            mode: ProjectMode::Hackathon,
            constraints: String::new(),
            focus: Field::Domain,
        }
    }
}

impl ProjectForm {
    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn set_focus(&mut self, field: Field) {
        self.focus = field;
    }

    /// Display value of a row.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Domain => self.domain.as_str(),
            Field::Audience => self.audience.as_str(),
            Field::Difficulty => self.difficulty.display_name(),
            Field::TimeDays => self.time_days.as_str(),
            Field::Skills => self.skills.as_str(),
            Field::Mode => self.mode.display_name(),
            Field::Constraints => self.constraints.as_str(),
            Field::Submit => "",
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Domain => Some(&mut self.domain),
            Field::Audience => Some(&mut self.audience),
            Field::TimeDays => Some(&mut self.time_days),
            Field::Skills => Some(&mut self.skills),
            Field::Constraints => Some(&mut self.constraints),
            Field::Difficulty | Field::Mode | Field::Submit => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => {
                if self.focus == Field::Submit {
                    return FormAction::Submit;
                }
                self.focus = self.focus.next();
            }
            KeyCode::Left => self.cycle(false),
            KeyCode::Right => self.cycle(true),
            KeyCode::Backspace => {
                let focus = self.focus;
                if let Some(text) = self.text_mut(focus) {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                let focus = self.focus;
                // Days only takes digits, and few enough of them to fit a u32
                if focus == Field::TimeDays
                    && (!c.is_ascii_digit() || self.time_days.len() >= MAX_DAY_DIGITS)
                {
                    return FormAction::None;
                }
                if let Some(text) = self.text_mut(focus) {
                    text.push(c);
                }
            }
            _ => {}
        }
        FormAction::None
    }

    fn cycle(&mut self, forward: bool) {
        match self.focus {
            Field::Difficulty => self.difficulty = cycle(Difficulty::ALL, self.difficulty, forward),
            Field::Mode => self.mode = cycle(ProjectMode::ALL, self.mode, forward),
            _ => {}
        }
    }

    /// Build the request the controller sends. No validation happens here:
    /// an empty or zero field is sent as-is and rejected by the gateway.
    pub fn to_request(&self) -> GenerationRequest {
        GenerationRequest {
            domain: self.domain.trim().to_string(),
            audience: self.audience.trim().to_string(),
            difficulty: self.difficulty.as_str().to_string(),
            time_available_days: parse_days(&self.time_days),
            skills: non_empty(&self.skills),
            mode: self.mode.as_str().to_string(),
            constraints: non_empty(&self.constraints),
            multi_idea_count: Some(DEFAULT_IDEA_COUNT),
        }
    }
}

/// Empty means zero, which the gateway reports as missing. Too large saturates.
fn parse_days(s: &str) -> u32 {
    match s.trim().parse::<u32>() {
        Ok(days) => days,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u32::MAX,
        Err(_) => 0,
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % all.len()
    } else {
        (idx + all.len() - 1) % all.len()
    };
    all[next]
}
