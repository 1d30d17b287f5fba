pub mod dialogue;
pub mod prompt;

pub use dialogue::{DialogueController, TurnNotice, TurnOutcome};
pub use prompt::PromptComposer;
