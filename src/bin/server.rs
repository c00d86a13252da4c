use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use entity_sentiment::config::ServerConfig;
use entity_sentiment::entity_sentiment::EntitySentimentPipeline;
use entity_sentiment::sentiment::SentimentAnalysisPipelineBuilder;
use entity_sentiment::server;
use entity_sentiment::token_classification::TokenClassificationPipelineBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    info!(?config, "starting entity-sentiment-server");

    let build_config = config.clone();
    let (tagger, classifier) = tokio::task::spawn_blocking(move || {
        let tagger = TokenClassificationPipelineBuilder::bert(build_config.ner_model)
            .device(build_config.device.clone())
            .build()?;
        let classifier = SentimentAnalysisPipelineBuilder::bert(build_config.sentiment_model)
            .device(build_config.device)
            .build()?;
        entity_sentiment::error::Result::Ok((tagger, classifier))
    })
    .await
    .context("model loading task panicked")?
    .context("failed to load models")?;

    info!(device = ?tagger.device(), "models ready");

    let pipeline = Arc::new(
        EntitySentimentPipeline::new(tagger, classifier).with_options(config.attribution_options()),
    );

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    server::serve(listener, server::router(pipeline)).await?;
    Ok(())
}
