use super::model::TokenClassificationModel;
use super::pipeline::TokenClassificationPipeline;
use crate::error::Result;
use crate::pipelines::utils::{BasePipelineBuilder, DeviceRequest, StandardPipelineBuilder};

crate::pipelines::utils::impl_device_methods!(delegated: TokenClassificationPipelineBuilder<M: TokenClassificationModel>);

/// Builder for creating [`TokenClassificationPipeline`] instances.
///
/// Use [`Self::bert`] as the entry point.
pub struct TokenClassificationPipelineBuilder<M: TokenClassificationModel>(
    StandardPipelineBuilder<M::Options>,
);

impl<M: TokenClassificationModel> TokenClassificationPipelineBuilder<M> {
    pub(crate) fn new(options: M::Options) -> Self {
        Self(StandardPipelineBuilder::new(options))
    }

    /// Builds the pipeline with configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if model download, loading or device initialization fails.
    pub fn build(self) -> Result<TokenClassificationPipeline<M>> {
        BasePipelineBuilder::build(self)
    }
}

impl<M: TokenClassificationModel> BasePipelineBuilder<M> for TokenClassificationPipelineBuilder<M> {
    type Pipeline = TokenClassificationPipeline<M>;
    type Options = M::Options;

    fn options(&self) -> &Self::Options {
        &self.0.options
    }

    fn device_request(&self) -> &DeviceRequest {
        &self.0.device_request
    }

    fn create_model(options: Self::Options, device: candle_core::Device) -> Result<M> {
        M::new(options, device)
    }

    fn get_tokenizer(options: Self::Options) -> Result<tokenizers::Tokenizer> {
        M::get_tokenizer(options)
    }

    fn construct_pipeline(model: M, tokenizer: tokenizers::Tokenizer) -> Result<Self::Pipeline> {
        Ok(TokenClassificationPipeline { model, tokenizer })
    }
}

impl TokenClassificationPipelineBuilder<super::TokenClassificationBert> {
    /// Creates a builder for a BERT token-classification checkpoint.
    pub fn bert(checkpoint: crate::models::BertCheckpoint) -> Self {
        Self::new(checkpoint)
    }
}
