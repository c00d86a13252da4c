use super::model::{SentimentAnalysisModel, SentimentResult};
use crate::error::Result;
use crate::pipelines::entity_sentiment::SentimentClassifier;
use crate::pipelines::stats::PipelineStats;
use tokenizers::Tokenizer;

// ============ Output types ============

/// A sentiment prediction with the checkpoint's raw label and confidence score.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// The predicted label as named by the checkpoint (e.g. "Positive").
    pub label: String,
    /// Confidence score (0.0 to 1.0).
    pub score: f32,
}

/// Single-text output from `run()`.
#[derive(Debug)]
pub struct Output {
    /// Sentiment prediction.
    pub prediction: Prediction,
    /// Execution statistics.
    pub stats: PipelineStats,
}

/// Single result in batch output.
#[derive(Debug)]
pub struct BatchResult {
    /// Input text.
    pub text: String,
    /// Prediction or error for this input.
    pub prediction: Result<Prediction>,
}

/// Batch output from `run()`.
#[derive(Debug)]
pub struct BatchOutput {
    /// Results for each input.
    pub results: Vec<BatchResult>,
    /// Execution statistics.
    pub stats: PipelineStats,
}

impl From<SentimentResult> for Prediction {
    fn from(result: SentimentResult) -> Self {
        Self {
            label: result.label,
            score: result.score,
        }
    }
}

// ============ Input dispatch ============

/// Chooses the output shape of `run()` from the input type.
#[doc(hidden)]
pub trait SentimentInput<'a> {
    /// [`Output`] for one text, [`BatchOutput`] for several.
    type Output;

    #[doc(hidden)]
    fn classify_with<M: SentimentAnalysisModel>(
        self,
        pipeline: &SentimentAnalysisPipeline<M>,
    ) -> Result<Self::Output>;
}

impl<'a> SentimentInput<'a> for &'a str {
    type Output = Output;

    fn classify_with<M: SentimentAnalysisModel>(
        self,
        pipeline: &SentimentAnalysisPipeline<M>,
    ) -> Result<Output> {
        let stats = PipelineStats::start();
        let prediction = pipeline
            .model
            .predict_with_score(&pipeline.tokenizer, self)?
            .into();
        Ok(Output {
            prediction,
            stats: stats.finish(1),
        })
    }
}

impl<'a> SentimentInput<'a> for &'a [&'a str] {
    type Output = BatchOutput;

    fn classify_with<M: SentimentAnalysisModel>(
        self,
        pipeline: &SentimentAnalysisPipeline<M>,
    ) -> Result<BatchOutput> {
        pipeline.run_batch(self)
    }
}

impl<'a, const N: usize> SentimentInput<'a> for &'a [&'a str; N] {
    type Output = BatchOutput;

    fn classify_with<M: SentimentAnalysisModel>(
        self,
        pipeline: &SentimentAnalysisPipeline<M>,
    ) -> Result<BatchOutput> {
        pipeline.run_batch(self.as_slice())
    }
}

// ============ Pipeline ============

/// Classifies text sentiment with a sequence-classification checkpoint.
///
/// Construct with [`SentimentAnalysisPipelineBuilder`](super::SentimentAnalysisPipelineBuilder).
///
/// # Examples
///
/// ```rust,no_run
/// # use entity_sentiment::sentiment::{BertCheckpoint, SentimentAnalysisPipelineBuilder};
/// # fn main() -> entity_sentiment::error::Result<()> {
/// let pipeline = SentimentAnalysisPipelineBuilder::bert(BertCheckpoint::TurkishSentiment).build()?;
///
/// let output = pipeline.run("hizmetiniz berbat")?;
/// println!("{}: {:.2}", output.prediction.label, output.prediction.score);
///
/// let output = pipeline.run(&["çok iyi", "rezalet"])?;
/// for r in output.results {
///     println!("{} → {}", r.text, r.prediction?.label);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SentimentAnalysisPipeline<M: SentimentAnalysisModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipeline<M> {
    /// Classifies one text or a batch.
    ///
    /// Single input → [`Output`], failing on tokenization or inference errors.
    /// Batch → [`BatchOutput`], where each text carries its own result.
    pub fn run<'a, I: SentimentInput<'a>>(&self, input: I) -> Result<I::Output> {
        input.classify_with(self)
    }

    fn run_batch(&self, texts: &[&str]) -> Result<BatchOutput> {
        let stats = PipelineStats::start();

        let results = self
            .model
            .predict_with_score_batch(&self.tokenizer, texts)?
            .into_iter()
            .zip(texts)
            .map(|(prediction, text)| BatchResult {
                text: text.to_string(),
                prediction: prediction.map(Prediction::from),
            })
            .collect();

        Ok(BatchOutput {
            results,
            stats: stats.finish(texts.len()),
        })
    }

    /// Device the model runs on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

impl<M> SentimentClassifier for SentimentAnalysisPipeline<M>
where
    M: SentimentAnalysisModel + Send + Sync,
{
    fn classify(&self, text: &str) -> Result<String> {
        Ok(self.run(text)?.prediction.label)
    }
}
