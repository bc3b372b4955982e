pub mod system;
pub mod user;

use ideaforge_core::chat::ChatMessage;
use ideaforge_core::GenerationRequest;

/// Assemble the two-message prompt sent to the completion endpoint.
pub fn assemble_messages(req: &GenerationRequest) -> Vec<ChatMessage> {
    let mut user_prompt = String::new();
    user::append_request(&mut user_prompt, req);

    vec![
        ChatMessage::system(system::SYSTEM_PROMPT),
        ChatMessage::user(user_prompt),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideaforge_core::chat::Role;

    fn request() -> GenerationRequest {
        GenerationRequest {
            domain: "fitness".into(),
            audience: "students".into(),
            difficulty: "beginner".into(),
            time_available_days: 3,
            skills: None,
            mode: "hackathon".into(),
            constraints: None,
            multi_idea_count: None,
        }
    }

    #[test]
    fn system_then_user() {
        let messages = assemble_messages(&request());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[0].content.contains("\"ideas\""));
        assert!(messages[1].content.contains("fitness"));
    }
}
