//! Sentiment analysis pipeline.
//!
//! Classify text with a BERT sequence-classification checkpoint. Labels are
//! returned exactly as the checkpoint names them (the Turkish checkpoint uses
//! `Positive`, `Negative` and `Neutral`), together with a confidence score.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use entity_sentiment::sentiment::{BertCheckpoint, SentimentAnalysisPipelineBuilder};
//!
//! # fn main() -> entity_sentiment::error::Result<()> {
//! let pipeline = SentimentAnalysisPipelineBuilder::bert(BertCheckpoint::TurkishSentiment).build()?;
//!
//! let output = pipeline.run("Bu operatörden çok memnunum")?;
//! println!("sentiment: {} (confidence: {:.2})", output.prediction.label, output.prediction.score);
//! # Ok(())
//! # }
//! ```
//!
//! The pipeline also implements
//! [`SentimentClassifier`](crate::entity_sentiment::SentimentClassifier), so it can be handed
//! straight to [`EntitySentimentPipeline`](crate::entity_sentiment::EntitySentimentPipeline).

// ============ Internal API ============

pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod pipeline;

// ============ Public API ============

pub use crate::models::BertCheckpoint;
pub use crate::pipelines::stats::PipelineStats;
pub use builder::SentimentAnalysisPipelineBuilder;
pub use pipeline::{BatchOutput, BatchResult, Output, Prediction, SentimentAnalysisPipeline};

#[doc(hidden)]
pub use pipeline::SentimentInput;

/// Only for generic annotations. Use [`SentimentAnalysisPipelineBuilder::bert`].
pub type SentimentBert = crate::models::bert::SentimentBertModel;
