//! Integration tests against the real checkpoints.
//! Run with: cargo test --features integration

#![cfg(feature = "integration")]

use entity_sentiment::entity_sentiment::{EntitySentimentPipeline, Sentiment};
use entity_sentiment::sentiment::{BertCheckpoint, SentimentAnalysisPipelineBuilder};
use entity_sentiment::token_classification::TokenClassificationPipelineBuilder;

#[test]
fn ner_tags_organizations() -> anyhow::Result<()> {
    let pipeline = TokenClassificationPipelineBuilder::bert(BertCheckpoint::TurkishNer).build()?;

    let text = "Turkcell ve Vodafone fiyatlara zam yaptı";
    let output = pipeline.run(text)?;

    assert!(!output.entities.is_empty());
    for tag in &output.entities {
        assert_ne!(tag.group, "O");
        assert!(tag.span.end <= text.len());
        assert!(tag.score > 0.0 && tag.score <= 1.0);
    }
    Ok(())
}

#[test]
fn sentiment_basic() -> anyhow::Result<()> {
    let pipeline =
        SentimentAnalysisPipelineBuilder::bert(BertCheckpoint::TurkishSentiment).build()?;

    let res = pipeline.run("Bu operatörden çok memnunum, teşekkürler")?;
    assert!(!res.prediction.label.trim().is_empty());
    assert!(res.prediction.score >= 0.0 && res.prediction.score <= 1.0);
    Ok(())
}

#[test]
fn sentiment_batch_keeps_order() -> anyhow::Result<()> {
    let pipeline =
        SentimentAnalysisPipelineBuilder::bert(BertCheckpoint::TurkishSentiment).build()?;

    let out = pipeline.run(&["Harika bir hizmet", "Berbat, hiç çekmiyor", ""])?;
    assert_eq!(out.results.len(), 3);
    assert_eq!(out.results[1].text, "Berbat, hiç çekmiyor");
    for r in &out.results {
        assert!(r.prediction.is_ok());
    }
    Ok(())
}

#[test]
fn analyze_with_real_models() -> anyhow::Result<()> {
    let pipeline = EntitySentimentPipeline::new(
        TokenClassificationPipelineBuilder::bert(BertCheckpoint::TurkishNer).build()?,
        SentimentAnalysisPipelineBuilder::bert(BertCheckpoint::TurkishSentiment).build()?,
    );

    let analysis = pipeline.analyze(
        "Fiber 100mb SuperOnline kullanıcısıyım, @Turkcell bağlantım sürekli kopuyor",
    )?;

    assert_eq!(analysis.entity_list.len(), analysis.results.len());
    assert!(analysis.entity_list.iter().any(|e| e == "@Turkcell"));
    for r in &analysis.results {
        assert!(matches!(
            r.sentiment,
            Sentiment::Positive | Sentiment::Negative | Sentiment::Neutral
        ));
    }
    Ok(())
}
