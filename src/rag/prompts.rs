//! Prompts for the job search assistant

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::llm::PromptTemplate;

pub const SYSTEM_PROMPT: &str = "You are Career Copilot, an AI assistant that helps users find relevant job opportunities based on their queries.
    You have access to a list of job postings with details such as job title, company, location, type, experience level, and category.
    Use the provided job details to answer user queries accurately and helpfully. Also format your respones in a friendly and professional
    manner.";

fn user_template() -> &'static PromptTemplate {
    static TEMPLATE: OnceLock<PromptTemplate> = OnceLock::new();
    TEMPLATE.get_or_init(|| {
        PromptTemplate::new(
            "User's query : {{query}} \n{{jobs_context}}\nBased on the above job postings, provide a concise and helpful response to the user's query.",
        )
    })
}

/// Build the user turn from the query and the assembled jobs context
pub fn build_user_prompt(query: &str, jobs_context: &str) -> String {
    let values = HashMap::from([("query", query), ("jobs_context", jobs_context)]);
    user_template().render(&values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_layout() {
        let prompt = build_user_prompt("rust jobs", "\n\nNo relevant job postings found.");
        assert_eq!(
            prompt,
            "User's query : rust jobs \n\n\nNo relevant job postings found.\nBased on the above job postings, provide a concise and helpful response to the user's query."
        );
    }

    #[test]
    fn test_system_prompt_names_assistant() {
        assert!(SYSTEM_PROMPT.starts_with("You are Career Copilot"));
    }
}
