/// How `@handle` tokens are located in the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MentionLocator {
    /// Every token maps to the first occurrence of its text, so a repeated handle
    /// gets the same span each time.
    #[default]
    FirstOccurrence,
    /// Every token keeps its own position in the text.
    Positional,
}

/// Tunables of the attribution step. Defaults reproduce the service behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionOptions {
    /// Characters of right context handed to the sentiment classifier.
    pub context_chars: usize,
    /// Largest character gap between two organizations that still joins them.
    pub max_gap_chars: usize,
    /// Prefix marking a sub-word fragment that continues the previous tag.
    pub continuation_marker: String,
    /// Tag group treated as an organization.
    pub organization_group: String,
    /// Span lookup for injected `@handle` mentions.
    pub mention_locator: MentionLocator,
}

impl Default for AttributionOptions {
    fn default() -> Self {
        Self {
            context_chars: 10,
            max_gap_chars: 1,
            continuation_marker: "##".to_string(),
            organization_group: "ORG".to_string(),
            mention_locator: MentionLocator::FirstOccurrence,
        }
    }
}
