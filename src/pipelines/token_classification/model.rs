use crate::error::Result;
use tokenizers::Tokenizer;

/// Prediction for one non-special token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPrediction {
    /// Vocabulary token, e.g. `##cell`.
    pub token: String,
    /// BIO label, e.g. `B-ORG`, `I-ORG`, `O`.
    pub label: String,
    /// Softmax probability of `label`.
    pub score: f32,
    /// Byte offset where the token starts.
    pub start: usize,
    /// Byte offset where the token ends.
    pub end: usize,
}

pub trait TokenClassificationModel {
    type Options: std::fmt::Debug + Clone;

    fn new(options: Self::Options, device: candle_core::Device) -> Result<Self>
    where
        Self: Sized;

    fn predict(&self, tokenizer: &Tokenizer, text: &str) -> Result<Vec<TokenPrediction>>;

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer>;

    fn device(&self) -> &candle_core::Device;
}
