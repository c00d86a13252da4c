use super::aggregation::aggregate_simple;
use super::model::TokenClassificationModel;
use crate::error::Result;
use crate::pipelines::entity_sentiment::{RawTag, Tagger};
use crate::pipelines::stats::PipelineStats;
use tokenizers::Tokenizer;

/// Output from `run()`.
#[derive(Debug)]
pub struct Output {
    /// Entity tags in text order, `O` tokens removed.
    pub entities: Vec<RawTag>,
    /// Execution statistics.
    pub stats: PipelineStats,
}

/// Tags named entities with a token-classification checkpoint.
///
/// Construct with [`TokenClassificationPipelineBuilder`](super::TokenClassificationPipelineBuilder).
///
/// # Examples
///
/// ```rust,no_run
/// # use entity_sentiment::token_classification::{BertCheckpoint, TokenClassificationPipelineBuilder};
/// # fn main() -> entity_sentiment::error::Result<()> {
/// let pipeline = TokenClassificationPipelineBuilder::bert(BertCheckpoint::TurkishNer).build()?;
///
/// let output = pipeline.run("Turkcell ve Vodafone fiyatları artırdı")?;
/// for tag in &output.entities {
///     println!("{} [{}] {:?}", tag.token_text, tag.group, tag.span);
/// }
/// # Ok(())
/// # }
/// ```
pub struct TokenClassificationPipeline<M: TokenClassificationModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: TokenClassificationModel> TokenClassificationPipeline<M> {
    /// Tag entities in `text`. Spans are byte offsets into `text`.
    pub fn run(&self, text: &str) -> Result<Output> {
        let stats_builder = PipelineStats::start();

        let predictions = self.model.predict(&self.tokenizer, text)?;
        let entities = aggregate_simple(&predictions);

        Ok(Output {
            entities,
            stats: stats_builder.finish(1),
        })
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

impl<M> Tagger for TokenClassificationPipeline<M>
where
    M: TokenClassificationModel + Send + Sync,
{
    fn tag(&self, text: &str) -> Result<Vec<RawTag>> {
        Ok(self.run(text)?.entities)
    }
}
