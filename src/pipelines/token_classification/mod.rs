//! Token classification (named-entity recognition) pipeline.
//!
//! Tags every word-piece with a BIO label and groups consecutive pieces of the
//! same entity type into [`RawTag`]s. A group that begins inside a word keeps its
//! `##` prefix.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use entity_sentiment::token_classification::{BertCheckpoint, TokenClassificationPipelineBuilder};
//!
//! # fn main() -> entity_sentiment::error::Result<()> {
//! let pipeline = TokenClassificationPipelineBuilder::bert(BertCheckpoint::TurkishNer).build()?;
//!
//! let output = pipeline.run("Superonline kullanıcısıyım")?;
//! println!("{} entities in {:?}", output.entities.len(), output.stats.total_time);
//! # Ok(())
//! # }
//! ```

// ============ Internal API ============

pub(crate) mod aggregation;
pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod pipeline;

// ============ Public API ============

pub use crate::models::BertCheckpoint;
pub use crate::pipelines::entity_sentiment::RawTag;
pub use crate::pipelines::stats::PipelineStats;
pub use builder::TokenClassificationPipelineBuilder;
pub use model::TokenPrediction;
pub use pipeline::{Output, TokenClassificationPipeline};

/// Only for generic annotations. Use [`TokenClassificationPipelineBuilder::bert`].
pub type TokenClassificationBert = crate::models::bert::TokenClassificationBertModel;
