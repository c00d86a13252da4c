//! Organization mentions and their sentiment in Turkish social-media text.
//!
//! Powered by [Candle](https://github.com/huggingface/candle). Two BERT pipelines
//! (token classification and sentiment) feed an attribution step that merges
//! sub-word tags, promotes `@handle` mentions to organizations, clusters adjacent
//! mentions and classifies the text right after each cluster.
//!
//! ```rust,no_run
//! use entity_sentiment::entity_sentiment::EntitySentimentPipeline;
//! use entity_sentiment::sentiment::{BertCheckpoint, SentimentAnalysisPipelineBuilder};
//! use entity_sentiment::token_classification::TokenClassificationPipelineBuilder;
//!
//! # fn main() -> entity_sentiment::error::Result<()> {
//! let tagger = TokenClassificationPipelineBuilder::bert(BertCheckpoint::TurkishNer).build()?;
//! let classifier =
//!     SentimentAnalysisPipelineBuilder::bert(BertCheckpoint::TurkishSentiment).build()?;
//!
//! let pipeline = EntitySentimentPipeline::new(tagger, classifier);
//! let analysis = pipeline.analyze("@Turkcell çekmiyor, @Vodafone harika")?;
//! for r in &analysis.results {
//!     println!("{} → {}", r.entity, r.sentiment);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

// ============ Internal API ============

pub(crate) mod loaders;
pub(crate) mod models;
pub(crate) mod pipelines;

// ============ Public API ============

pub mod config;
pub mod error;
pub mod server;

pub use pipelines::utils::DeviceRequest;
pub use pipelines::{entity_sentiment, sentiment, token_classification};
