pub mod chat;
pub mod error;
pub mod idea;
pub mod lenient;
pub mod recovery;
pub mod request;

pub use error::{RecoveryError, RequestError, MISSING_FIELDS_MESSAGE};
pub use idea::{Feasibility, GenerationResponse, Idea, RoadmapPhase, TaskArea, WorkPackage};
pub use request::{Difficulty, GenerationRequest, ProjectMode, DEFAULT_IDEA_COUNT};
