//! Prompt assembly: persona, retrieval context and the raw question.

use swarmboard_core::knowledge::KnowledgeItem;
use swarmboard_core::retrieval;

/// Persona used by the standard and ephemeral widgets.
pub const DEFAULT_PERSONA: &str = "You are the assistant for The Swarm Board project. \
Answer the user's question using the context from the knowledge base below. \
If the context does not contain the answer, say so honestly instead of guessing. \
Keep answers concise and friendly.";

/// Builds the single prompt sent to the completion endpoint.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    persona: String,
}

impl PromptAssembler {
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
        }
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// Score `knowledge` against `question` and lay out the prompt.
    pub fn assemble(&self, knowledge: &[KnowledgeItem], question: &str) -> String {
        let context = retrieval::build_context(knowledge, question);
        format!(
            "{}\n\nCONTEXT FROM KNOWLEDGE BASE:\n{}\n\nUSER QUESTION:\n{}",
            self.persona, context, question
        )
    }
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONA)
    }
}
