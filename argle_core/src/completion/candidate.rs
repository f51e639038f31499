/// A single completion for the word under the cursor.
///
/// Displays as `value\tdescription`, the annotated form read by shell completion scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub(crate) value: String,
    pub(crate) description: String,
}

impl Candidate {
    pub(crate) fn new(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: description.into(),
        }
    }

    /// The completed word.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// A short description, for shells which display one alongside the word.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}", self.value, self.description)
    }
}

/// How [`App::write_completions`](crate::App::write_completions) writes each candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionStyle {
    /// `value\tdescription`, for shells which display descriptions (ex: fish).
    /// The generated bash script also accepts this, discarding the description.
    #[default]
    Annotated,
    /// `value` alone.
    Plain,
}
