//! Organization mentions with the sentiment of the text that follows them.
//!
//! [`EntitySentimentPipeline`] composes two capabilities, a [`Tagger`] and a
//! [`SentimentClassifier`], into one `analyze` call:
//!
//! 1. the tagger runs on a sentence-cased copy of the text (first letter upper,
//!    the rest lower);
//! 2. `##` continuation fragments are glued to the previous entity, re-sliced from the
//!    original text so casing is preserved;
//! 3. every `@handle` token is added as an organization;
//! 4. organizations are sorted and neighbours at most one character apart are
//!    clustered, keeping the first member's text;
//! 5. the ten characters after each cluster are classified and mapped to
//!    [`Sentiment`].
//!
//! Both pipelines of this crate implement the capabilities:
//!
//! ```rust,no_run
//! use entity_sentiment::entity_sentiment::EntitySentimentPipeline;
//! use entity_sentiment::sentiment::{BertCheckpoint, SentimentAnalysisPipelineBuilder};
//! use entity_sentiment::token_classification::TokenClassificationPipelineBuilder;
//!
//! # fn main() -> entity_sentiment::error::Result<()> {
//! let pipeline = EntitySentimentPipeline::new(
//!     TokenClassificationPipelineBuilder::bert(BertCheckpoint::TurkishNer).build()?,
//!     SentimentAnalysisPipelineBuilder::bert(BertCheckpoint::TurkishSentiment).build()?,
//! );
//!
//! let analysis = pipeline.analyze("Superonline kullanıcısıyım, @Turkcell bağlantı kopuyor")?;
//! println!("{}", serde_json::to_string_pretty(&analysis).unwrap());
//! # Ok(())
//! # }
//! ```
//!
//! Repeated handles all receive the span of their first occurrence unless
//! [`MentionLocator::Positional`] is selected in [`AttributionOptions`].

// ============ Internal API ============

pub(crate) mod capabilities;
pub(crate) mod cluster;
pub(crate) mod mentions;
pub(crate) mod merge;
pub(crate) mod options;
pub(crate) mod pipeline;
pub(crate) mod types;

// ============ Public API ============

pub use capabilities::{SentimentClassifier, Tagger};
pub use options::{AttributionOptions, MentionLocator};
pub use pipeline::EntitySentimentPipeline;
pub use types::{Analysis, AttributionResult, Entity, RawTag, Sentiment, Span};
