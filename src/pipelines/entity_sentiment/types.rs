use serde::{Deserialize, Serialize};

/// Half-open `[start, end)` byte range into the analyzed text.
///
/// Offsets sit on UTF-8 character boundaries, which is what the tokenizer reports
/// and what `str` slicing requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    /// Creates a span from its two offsets.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered (zero for inverted spans).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The covered text, or `""` when the span does not fit `text`.
    pub fn slice<'t>(&self, text: &'t str) -> &'t str {
        text.get(self.start..self.end).unwrap_or("")
    }
}

/// One aggregated tagger output: a label group over a (possibly sub-word) token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTag {
    /// Entity group, e.g. `ORG`, `PER`, `LOC`.
    pub group: String,
    /// Token text as the tagger rendered it; `##`-prefixed for continuation fragments.
    pub token_text: String,
    /// Location in the text the tagger was given.
    pub span: Span,
    /// Mean confidence of the tokens in the group.
    pub score: f32,
}

impl RawTag {
    /// A tag with full confidence, handy when adapting external taggers.
    pub fn new(group: impl Into<String>, token_text: impl Into<String>, span: Span) -> Self {
        Self {
            group: group.into(),
            token_text: token_text.into(),
            span,
            score: 1.0,
        }
    }
}

/// A merged, whole-word mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity group, e.g. `ORG`.
    pub group: String,
    /// Mention text in the original casing.
    pub text: String,
    /// Location in the original text.
    pub span: Span,
}

impl From<RawTag> for Entity {
    fn from(tag: RawTag) -> Self {
        Self {
            group: tag.group,
            text: tag.token_text,
            span: tag.span,
        }
    }
}

/// Sentiment attributed to an organization, serialized with the Turkish labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    /// `olumlu`
    #[serde(rename = "olumlu")]
    Positive,
    /// `olumsuz`
    #[serde(rename = "olumsuz")]
    Negative,
    /// `nötr`
    #[serde(rename = "nötr")]
    Neutral,
}

impl Sentiment {
    /// Maps a raw classifier label. Anything other than `Positive`, `Negative` or
    /// `Neutral` is neutral.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Positive" => Sentiment::Positive,
            "Negative" => Sentiment::Negative,
            "Neutral" => Sentiment::Neutral,
            _ => Sentiment::Neutral,
        }
    }

    /// User-facing Turkish label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "olumlu",
            Sentiment::Negative => "olumsuz",
            Sentiment::Neutral => "nötr",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment attributed to one organization cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionResult {
    /// Representative text of the cluster.
    pub entity: String,
    /// Sentiment of the text right after the cluster.
    pub sentiment: Sentiment,
}

/// Output of [`EntitySentimentPipeline::analyze`](super::EntitySentimentPipeline::analyze).
///
/// `entity_list[i] == results[i].entity` for every index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Organization texts in cluster order.
    pub entity_list: Vec<String>,
    /// Attributed sentiment, parallel to `entity_list`.
    pub results: Vec<AttributionResult>,
}

impl Analysis {
    pub(crate) fn push(&mut self, entity: String, sentiment: Sentiment) {
        self.entity_list.push(entity.clone());
        self.results.push(AttributionResult { entity, sentiment });
    }

    /// Number of attributed organizations.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no organization was found.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
