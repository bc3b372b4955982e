use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RequestError;

pub const DEFAULT_IDEA_COUNT: u32 = 3;

/// Fields that must be present and truthy for a request to be accepted.
pub const REQUIRED_FIELDS: &[&str] = &[
    "domain",
    "audience",
    "difficulty",
    "time_available_days",
    "mode",
];

const SKILLS_PLACEHOLDER: &str = "Not specified";
const CONSTRAINTS_PLACEHOLDER: &str = "None specified";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub domain: String,
    pub audience: String,
    pub difficulty: String,
    pub time_available_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_idea_count: Option<u32>,
}

impl GenerationRequest {
    /// Parse and validate a raw request body.
    ///
    /// Required fields are checked for presence before any typing happens, so
    /// `{"domain": ""}` is a missing-fields error rather than a type error.
    pub fn from_json(body: &[u8]) -> Result<Self, RequestError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| RequestError::Malformed(e.to_string()))?;

        if REQUIRED_FIELDS
            .iter()
            .any(|field| !is_truthy(value.get(*field)))
        {
            return Err(RequestError::MissingFields);
        }

        serde_json::from_value(value).map_err(|e| RequestError::Malformed(e.to_string()))
    }

    /// Number of ideas to ask the model for. Zero is treated as unset.
    pub fn idea_count(&self) -> u32 {
        match self.multi_idea_count {
            Some(n) if n > 0 => n,
            _ => DEFAULT_IDEA_COUNT,
        }
    }

    pub fn skills_or_placeholder(&self) -> &str {
        non_empty(self.skills.as_deref()).unwrap_or(SKILLS_PLACEHOLDER)
    }

    pub fn constraints_or_placeholder(&self) -> &str {
        non_empty(self.constraints.as_deref()).unwrap_or(CONSTRAINTS_PLACEHOLDER)
    }

    /// Total hours the task breakdown should add up to.
    pub fn hour_budget(&self) -> u64 {
        u64::from(self.time_available_days) * 8
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: &[Difficulty] = &[
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// What the project is being built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectMode {
    Hackathon,
    Portfolio,
    Startup,
    Learning,
}

impl ProjectMode {
    pub const ALL: &[ProjectMode] = &[
        ProjectMode::Hackathon,
        ProjectMode::Portfolio,
        ProjectMode::Startup,
        ProjectMode::Learning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectMode::Hackathon => "hackathon",
            ProjectMode::Portfolio => "portfolio",
            ProjectMode::Startup => "startup",
            ProjectMode::Learning => "learning",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectMode::Hackathon => "Hackathon",
            ProjectMode::Portfolio => "Portfolio",
            ProjectMode::Startup => "Startup MVP",
            ProjectMode::Learning => "Learning",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "hackathon" => Some(ProjectMode::Hackathon),
            "portfolio" => Some(ProjectMode::Portfolio),
            "startup" => Some(ProjectMode::Startup),
            "learning" => Some(ProjectMode::Learning),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
