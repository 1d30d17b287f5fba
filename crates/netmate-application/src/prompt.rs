//! Prompt composition for the generative backend.

use minijinja::{Environment, context};
use netmate_core::catalog::IssueRecord;
use netmate_core::error::{NetmateError, Result};
use netmate_core::{Catalog, ConversationMessage};

const TEMPLATE_NAME: &str = "wifi_troubleshooting";

// Tier 2 still tells the model to say "Contact Your ISP". The outage lookup
// itself is driven by the dialogue controller, not by this phrase.
const TEMPLATE: &str = r#"You are a specialized WiFi troubleshooting assistant. Your sole purpose is to help users resolve WiFi-related issues based on the provided dataset. Use the following information, chat history, and the user's latest query to provide assistance ONLY for WiFi problems.

    Context (WiFi issues and solutions database):
    {{ context }}

    Chat history:
    {{ chat_history }}

    Latest user query: {{ latest_query }}

    Instructions:
    1. Determine if the user's query is related to a WiFi issue from the provided dataset. If not, politely inform the user that you can only assist with WiFi-related problems.
    2. If the query is WiFi-related, analyze it in the context of the chat history to understand the full scope of the issue.
    3. Identify the most likely WiFi problem based on the symptoms described and any previous troubleshooting steps mentioned.
    4. Provide a clear, step-by-step solution tailored to the user's specific situation.
    5. Based on the solution_count, provide the appropriate solution:
    - If solution_count is 0 or 1, provide Solution 1 or Solution 2 respectively.
    - If solution_count is 2, use the phrase "Contact Your ISP" to trigger the API call.
    - If solution_count is 3 or 4, provide Solution 3 or Solution 4 respectively.
    6. Use technical terms when necessary, but always explain them in simple language.
    7. After providing each solution, ask the user if the issue is resolved or if they need further assistance.
    8. Maintain a friendly, patient, and encouraging tone throughout your response.

    Remember to consider the chat history and the number of solutions already provided ({{ solution_count }}).

    AI Assistant:
    "#;

/// Builds the instruction text sent to the generative backend.
///
/// Rendering is deterministic and reads its inputs only.
pub struct PromptComposer {
    env: Environment<'static>,
}

impl PromptComposer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.add_template(TEMPLATE_NAME, TEMPLATE)
            .map_err(|e| NetmateError::Template(e.to_string()))?;
        Ok(Self { env })
    }

    /// Renders the full prompt.
    ///
    /// `history` must exclude the latest user message, which is passed
    /// separately as `latest_query`.
    pub fn compose(
        &self,
        catalog: &Catalog,
        history: &[ConversationMessage],
        latest_query: &str,
        solution_count: usize,
    ) -> Result<String> {
        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| NetmateError::Template(e.to_string()))?;

        template
            .render(context! {
                context => render_catalog(catalog),
                chat_history => render_history(history),
                latest_query => latest_query,
                solution_count => solution_count,
            })
            .map_err(|e| NetmateError::Template(e.to_string()))
    }
}

fn render_record(record: &IssueRecord) -> String {
    let mut out = format!(
        "{}: {} - {}",
        record.issue, record.symptoms, record.possible_causes
    );
    for (idx, solution) in record.solutions.iter().enumerate() {
        out.push_str(&format!("\nSolution {}: {}", idx + 1, solution));
    }
    out
}

/// One block per record, newline separated.
pub fn render_catalog(catalog: &Catalog) -> String {
    catalog
        .iter()
        .map(render_record)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `role: content` per message, in order.
pub fn render_history(history: &[ConversationMessage]) -> String {
    history
        .iter()
        .map(ConversationMessage::to_history_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![IssueRecord {
            issue: "No Internet".to_string(),
            symptoms: "red light".to_string(),
            possible_causes: "line fault".to_string(),
            solutions: [
                "restart router".to_string(),
                "check cables".to_string(),
                "reset router".to_string(),
                "call technician".to_string(),
            ],
        }])
    }

    #[test]
    fn test_render_catalog_lists_all_solutions() {
        assert_eq!(
            render_catalog(&catalog()),
            "No Internet: red light - line fault\n\
             Solution 1: restart router\n\
             Solution 2: check cables\n\
             Solution 3: reset router\n\
             Solution 4: call technician"
        );
    }

    #[test]
    fn test_render_history_role_prefix() {
        let history = vec![
            ConversationMessage::user("my wifi is down"),
            ConversationMessage::assistant("restart the router"),
        ];
        assert_eq!(
            render_history(&history),
            "user: my wifi is down\nassistant: restart the router"
        );
    }

    #[test]
    fn test_compose_includes_every_section() {
        let composer = PromptComposer::new().unwrap();
        let history = vec![
            ConversationMessage::user("my wifi is down"),
            ConversationMessage::assistant("restart the router"),
        ];

        let prompt = composer
            .compose(&catalog(), &history, "still no signal", 1)
            .unwrap();

        assert!(prompt.starts_with("You are a specialized WiFi troubleshooting assistant."));
        assert!(prompt.contains("Solution 4: call technician"));
        assert!(prompt.contains("Chat history:\n    user: my wifi is down\nassistant: restart the router"));
        assert!(prompt.contains("Latest user query: still no signal"));
        assert!(prompt.contains("use the phrase \"Contact Your ISP\""));
        assert!(prompt.contains("number of solutions already provided (1)."));
        assert!(prompt.ends_with("\n    AI Assistant:\n    "));
    }

    #[test]
    fn test_compose_does_not_escape_markup() {
        let composer = PromptComposer::new().unwrap();
        let prompt = composer
            .compose(&catalog(), &[], "router shows <red> & blinks", 0)
            .unwrap();
        assert!(prompt.contains("Latest user query: router shows <red> & blinks"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let composer = PromptComposer::new().unwrap();
        let history = vec![ConversationMessage::user("hi")];
        let a = composer.compose(&catalog(), &history, "q", 3).unwrap();
        let b = composer.compose(&catalog(), &history, "q", 3).unwrap();
        assert_eq!(a, b);
    }
}
