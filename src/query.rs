//! Instruction strings handed to the lookup agent.

/// How the free text identifies the person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    ByName,
    ByDescription,
}

/// A lookup request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    mode: QueryMode,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, mode: QueryMode) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self::new(name, QueryMode::ByName)
    }

    pub fn by_description(description: impl Into<String>) -> Self {
        Self::new(description, QueryMode::ByDescription)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    /// The instruction sent to the agent as the user turn.
    pub fn instruction(&self) -> String {
        format_instruction(&self.text, self.mode)
    }
}

/// Build the agent instruction. `text` is inserted verbatim.
pub fn format_instruction(text: &str, mode: QueryMode) -> String {
    match mode {
        QueryMode::ByName => format!(
            "Search for the LinkedIn profile of {}. Your response should only include the LinkedIn URL.",
            text
        ),
        QueryMode::ByDescription => format!(
            "Search for the LinkedIn profile of a person described as: {}. Your response should only include the LinkedIn URL.",
            text
        ),
    }
}
