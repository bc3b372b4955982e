use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lenient;

/// One generated project proposal.
///
/// The gateway relays whatever the model produced, so no field here can fail
/// deserialization: absent, `null` or mistyped values fall back to defaults
/// and a partially filled idea is still renderable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Idea {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub tagline: String,
    #[serde(deserialize_with = "lenient::text")]
    pub problem: String,
    #[serde(deserialize_with = "lenient::text")]
    pub solution: String,
    #[serde(deserialize_with = "lenient::texts")]
    pub features: Vec<String>,
    #[serde(deserialize_with = "lenient::texts")]
    pub tech_stack: Vec<String>,
    /// ASCII diagram.
    #[serde(deserialize_with = "lenient::text")]
    pub architecture: String,
    #[serde(deserialize_with = "lenient::list")]
    pub roadmap: Vec<RoadmapPhase>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub feasibility: Feasibility,
    #[serde(deserialize_with = "lenient::text")]
    pub persona: String,
    #[serde(deserialize_with = "lenient::text")]
    pub monetization: String,
    #[serde(deserialize_with = "lenient::list")]
    pub task_breakdown: Vec<WorkPackage>,
}

impl Idea {
    pub fn total_estimated_hours(&self) -> f64 {
        self.task_breakdown.iter().map(|w| w.estimated_hours).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapPhase {
    #[serde(deserialize_with = "lenient::text")]
    pub phase: String,
    #[serde(deserialize_with = "lenient::texts")]
    pub tasks: Vec<String>,
}

/// Scores are kept as the model wrote them, decimals included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feasibility {
    /// 1-10
    #[serde(deserialize_with = "lenient::number")]
    pub technical: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub time_days: f64,
    /// 1-10
    #[serde(deserialize_with = "lenient::number")]
    pub market_fit: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkPackage {
    #[serde(deserialize_with = "lenient::or_default")]
    pub area: TaskArea,
    #[serde(deserialize_with = "lenient::texts")]
    pub tasks: Vec<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub estimated_hours: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskArea {
    #[serde(rename = "frontend", alias = "Frontend")]
    Frontend,
    #[serde(rename = "backend", alias = "Backend")]
    Backend,
    #[serde(rename = "AI/ML", alias = "ai/ml", alias = "ai_ml")]
    AiMl,
    #[serde(rename = "DevOps", alias = "devops")]
    DevOps,
    #[serde(rename = "UI/UX", alias = "ui/ux", alias = "ui_ux")]
    UiUx,
    #[default]
    #[serde(other)]
    Other,
}

impl TaskArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskArea::Frontend => "frontend",
            TaskArea::Backend => "backend",
            TaskArea::AiMl => "AI/ML",
            TaskArea::DevOps => "DevOps",
            TaskArea::UiUx => "UI/UX",
            TaskArea::Other => "other",
        }
    }
}

impl fmt::Display for TaskArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body returned by the gateway: either ideas or an error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationResponse {
    Ideas {
        #[serde(deserialize_with = "lenient::items")]
        ideas: Vec<Idea>,
    },
    Error { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_idea_deserializes() {
        let idea: Idea = serde_json::from_value(json!({
            "title": "FitQuest",
            "tagline": "Gamified workouts for dorms",
            "problem": "Students skip exercise",
            "solution": "Daily quests with friends",
            "features": ["quests", "streaks", "leaderboard", "reminders", "badges"],
            "tech_stack": ["React", "Supabase", "Tailwind", "Vite", "Postgres", "Vercel"],
            "architecture": "[Client] -> [API] -> [DB]",
            "roadmap": [{"phase": "Day 1", "tasks": ["auth", "schema"]}],
            "feasibility": {"technical": 8, "time_days": 3, "market_fit": 7},
            "persona": "A busy sophomore",
            "monetization": "Campus sponsorships",
            "task_breakdown": [
                {"area": "frontend", "tasks": ["screens"], "estimated_hours": 10},
                {"area": "AI/ML", "tasks": ["recommendations"], "estimated_hours": 6.5},
                {"area": "UI/UX", "tasks": ["mockups"], "estimated_hours": 7.5}
            ]
        }))
        .unwrap();

        assert_eq!(idea.title, "FitQuest");
        assert_eq!(idea.features.len(), 5);
        assert_eq!(idea.feasibility.technical, 8.0);
        assert_eq!(idea.task_breakdown[1].area, TaskArea::AiMl);
        assert_eq!(idea.total_estimated_hours(), 24.0);
    }

    #[test]
    fn partial_idea_uses_defaults() {
        let idea: Idea = serde_json::from_value(json!({"title": "Only a title"})).unwrap();
        assert_eq!(idea.title, "Only a title");
        assert!(idea.features.is_empty());
        assert_eq!(idea.feasibility, Feasibility::default());
    }

    #[test]
    fn unknown_area_maps_to_other() {
        let wp: WorkPackage =
            serde_json::from_value(json!({"area": "QA", "estimated_hours": 2})).unwrap();
        assert_eq!(wp.area, TaskArea::Other);
    }

    #[test]
    fn area_accepts_capitalized_aliases() {
        let wp: WorkPackage = serde_json::from_value(json!({"area": "Backend"})).unwrap();
        assert_eq!(wp.area, TaskArea::Backend);
        assert_eq!(serde_json::to_value(TaskArea::DevOps).unwrap(), json!("DevOps"));
    }

    #[test]
    fn response_variants() {
        let ok: GenerationResponse = serde_json::from_value(json!({"ideas": []})).unwrap();
        assert_eq!(ok, GenerationResponse::Ideas { ideas: vec![] });

        let err: GenerationResponse =
            serde_json::from_value(json!({"error": "could not produce json"})).unwrap();
        assert_eq!(
            err,
            GenerationResponse::Error {
                error: "could not produce json".into()
            }
        );

        assert!(serde_json::from_value::<GenerationResponse>(json!({"ideas": "nope"})).is_err());
    }

    #[test]
    fn null_and_mistyped_fields_fall_back() {
        let idea: Idea = serde_json::from_value(json!({
            "title": "A",
            "persona": null,
            "features": "just one",
            "tech_stack": ["Rust", null, 7],
            "architecture": ["[A]", "[B]"],
            "roadmap": [{"phase": 1, "tasks": null}, "not a phase"],
            "feasibility": {"technical": 7.5, "time_days": "3", "market_fit": null},
            "task_breakdown": [{"area": null, "tasks": ["x"], "estimated_hours": "4.5"}]
        }))
        .unwrap();

        assert_eq!(idea.title, "A");
        assert_eq!(idea.persona, "");
        assert_eq!(idea.features, vec!["just one"]);
        assert_eq!(idea.tech_stack, vec!["Rust", "7"]);
        assert_eq!(idea.architecture, "[A]\n[B]");
        assert_eq!(idea.roadmap.len(), 2);
        assert_eq!(idea.roadmap[0].phase, "1");
        assert_eq!(idea.roadmap[1], RoadmapPhase::default());
        assert_eq!(idea.feasibility.technical, 7.5);
        assert_eq!(idea.feasibility.time_days, 3.0);
        assert_eq!(idea.feasibility.market_fit, 0.0);
        assert_eq!(idea.task_breakdown[0].area, TaskArea::Other);
        assert_eq!(idea.total_estimated_hours(), 4.5);
    }

    #[test]
    fn one_odd_idea_keeps_the_batch() {
        let resp: GenerationResponse = serde_json::from_value(json!({
            "ideas": [
                {"title": "A", "persona": null},
                {"title": "B", "feasibility": {"technical": 7.5, "time_days": 3, "market_fit": 6}},
                "not an object"
            ]
        }))
        .unwrap();

        let GenerationResponse::Ideas { ideas } = resp else {
            panic!("expected ideas");
        };
        assert_eq!(ideas.len(), 3);
        assert_eq!(ideas[0].persona, "");
        assert_eq!(ideas[1].feasibility.technical, 7.5);
        assert_eq!(ideas[2], Idea::default());
    }

    #[test]
    fn null_feasibility_is_default() {
        let idea: Idea = serde_json::from_value(json!({"feasibility": null})).unwrap();
        assert_eq!(idea.feasibility, Feasibility::default());
    }
}
