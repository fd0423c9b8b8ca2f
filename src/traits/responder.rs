/// Source of assistant replies
pub trait AssistantResponder: Send + Sync {
    /// Produce the reply to a user prompt
    fn respond(&self, prompt: &str) -> String;
}
