use ideaforge_core::GenerationRequest;

/// Append the user instruction for a validated request.
pub fn append_request(prompt: &mut String, req: &GenerationRequest) {
    let count = req.idea_count();
    prompt.push_str(&format!(
        "Generate {count} unique project ideas for the following parameters:\n\n"
    ));
    prompt.push_str(&format!("- Domain: {}\n", req.domain));
    prompt.push_str(&format!("- Target audience: {}\n", req.audience));
    prompt.push_str(&format!("- Difficulty: {}\n", req.difficulty));
    prompt.push_str(&format!(
        "- Time available: {} days\n",
        req.time_available_days
    ));
    prompt.push_str(&format!("- Skills: {}\n", req.skills_or_placeholder()));
    prompt.push_str(&format!("- Mode: {}\n", req.mode));
    prompt.push_str(&format!(
        "- Constraints: {}\n\n",
        req.constraints_or_placeholder()
    ));
    prompt.push_str(&format!(
        "Return exactly {count} ideas in the \"ideas\" array. \
         The task_breakdown of each idea must total {} estimated hours.\n",
        req.hour_budget()
    ));
}
