//! Command-line and environment configuration of the HTTP service.

use clap::Parser;

use crate::entity_sentiment::{AttributionOptions, MentionLocator};
use crate::models::BertCheckpoint;
use crate::pipelines::utils::DeviceRequest;

/// Settings of `entity-sentiment-server`. Every flag can also come from the
/// environment variable shown in `--help`.
#[derive(Debug, Clone, Parser)]
#[command(name = "entity-sentiment-server", version, about)]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "ENTITY_SENTIMENT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "ENTITY_SENTIMENT_PORT", default_value_t = 7444)]
    pub port: u16,

    /// NER checkpoint: `turkish-ner` or a Hugging Face repo id.
    #[arg(long, env = "ENTITY_SENTIMENT_NER_MODEL", default_value = "turkish-ner")]
    pub ner_model: BertCheckpoint,

    /// Sentiment checkpoint: `turkish-sentiment` or a Hugging Face repo id.
    #[arg(
        long,
        env = "ENTITY_SENTIMENT_SENTIMENT_MODEL",
        default_value = "turkish-sentiment"
    )]
    pub sentiment_model: BertCheckpoint,

    /// Inference device: `cpu`, `cuda` or `cuda:N`.
    #[arg(long, env = "ENTITY_SENTIMENT_DEVICE", default_value = "cpu")]
    pub device: DeviceRequest,

    /// Characters after an organization handed to the sentiment model.
    #[arg(long, env = "ENTITY_SENTIMENT_CONTEXT_CHARS", default_value_t = 10)]
    pub context_chars: usize,

    /// Give every repeated `@handle` its own span instead of the first occurrence's.
    #[arg(long, env = "ENTITY_SENTIMENT_POSITIONAL_MENTIONS")]
    pub positional_mentions: bool,
}

impl ServerConfig {
    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Attribution options derived from the flags.
    pub fn attribution_options(&self) -> AttributionOptions {
        AttributionOptions {
            context_chars: self.context_chars,
            mention_locator: if self.positional_mentions {
                MentionLocator::Positional
            } else {
                MentionLocator::FirstOccurrence
            },
            ..AttributionOptions::default()
        }
    }
}
