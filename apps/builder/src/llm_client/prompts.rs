// Prompt templates for the suggestion backends.

/// System prompt shared by every suggestion call.
pub const SUGGESTION_SYSTEM: &str = "You are a concise resume-writing assistant. \
    Answer with the requested content only. \
    Do NOT include explanations, apologies, headings or markdown.";

/// `{role}` is replaced with the target role title.
pub const SKILLS_PROMPT_TEMPLATE: &str = "List the top 10 essential technical and soft skills \
    for a {role} in 2025. Return only the skills separated by commas, no explanations or \
    additional text.";

/// `{hints}` is replaced with the user's key points.
pub const SUMMARY_PROMPT_TEMPLATE: &str = "Using the following key points, write a professional \
    personal summary for a resume in 3-4 sentences. Make it compelling and highlight the \
    person's strengths and achievements: {hints}";

pub fn skills_prompt(role: &str) -> String {
    SKILLS_PROMPT_TEMPLATE.replace("{role}", role.trim())
}

pub fn summary_prompt(hints: &str) -> String {
    SUMMARY_PROMPT_TEMPLATE.replace("{hints}", hints.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_input() {
        assert!(skills_prompt("  Chef ").contains("for a Chef in 2025"));
        assert!(summary_prompt("10 years in kitchens").ends_with("achievements: 10 years in kitchens"));
    }
}
