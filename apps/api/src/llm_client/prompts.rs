// Shared prompt constants.
// Each coaching service builds its own prompt in coaching/prompts.rs.
// This file contains the cross-cutting system prompt.

/// System prompt sent with every coaching request.
pub const COACH_SYSTEM: &str = "You are an expert LinkedIn Profile Optimizer and Career Advisor. \
    You provide comprehensive analysis and recommendations for LinkedIn profiles, \
    job fit assessment, content optimization, and career guidance.\n\n\
    Always deliver specific, actionable advice, quantified assessments, \
    and industry-relevant insights.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_keeps_paragraph_break() {
        assert!(COACH_SYSTEM.contains("career guidance.\n\nAlways deliver"));
        assert!(!COACH_SYSTEM.contains("  "));
    }
}
