use super::types::RawTag;
use crate::error::Result;

/// Token classification capability: labeled spans for a text.
///
/// Spans must index into the text passed to [`Tagger::tag`]. Implementations are
/// shared across concurrent requests, hence `Send + Sync`.
pub trait Tagger: Send + Sync {
    /// Tags `text`, emitting tags in left-to-right order.
    fn tag(&self, text: &str) -> Result<Vec<RawTag>>;
}

/// Text classification capability: one raw sentiment label for a text span.
///
/// Must accept the empty string; what it answers for it is up to the model.
pub trait SentimentClassifier: Send + Sync {
    /// Returns the model's label, e.g. `Positive`.
    fn classify(&self, text: &str) -> Result<String>;
}

impl<T: Tagger + ?Sized> Tagger for std::sync::Arc<T> {
    fn tag(&self, text: &str) -> Result<Vec<RawTag>> {
        (**self).tag(text)
    }
}

impl<C: SentimentClassifier + ?Sized> SentimentClassifier for std::sync::Arc<C> {
    fn classify(&self, text: &str) -> Result<String> {
        (**self).classify(text)
    }
}
