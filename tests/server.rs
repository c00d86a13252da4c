use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use entity_sentiment::entity_sentiment::{
    EntitySentimentPipeline, RawTag, SentimentClassifier, Span, Tagger,
};
use entity_sentiment::error::{PipelineError, Result};
use entity_sentiment::server::{router, ErrorResponse, HealthResponse};

struct FixedTagger(Vec<RawTag>);

impl Tagger for FixedTagger {
    fn tag(&self, _text: &str) -> Result<Vec<RawTag>> {
        Ok(self.0.clone())
    }
}

struct TooLong;

impl Tagger for TooLong {
    fn tag(&self, _text: &str) -> Result<Vec<RawTag>> {
        Err(PipelineError::Tokenization("Input has 900 tokens, model accepts 512".into()))
    }
}

struct Constant(&'static str);

impl SentimentClassifier for Constant {
    fn classify(&self, _text: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

struct Crashing;

impl SentimentClassifier for Crashing {
    fn classify(&self, _text: &str) -> Result<String> {
        Err(PipelineError::Unexpected("weights went missing".into()))
    }
}

fn app<T, C>(tagger: T, classifier: C) -> Router
where
    T: Tagger + 'static,
    C: SentimentClassifier + 'static,
{
    router(Arc::new(EntitySentimentPipeline::new(tagger, classifier)))
}

fn predict_request(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn index_serves_the_form() {
    let response = app(FixedTagger(vec![]), Constant("Neutral"))
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<form id=\"analysisForm\">"));
    assert!(html.contains("fetch('/predict/'"));
}

#[tokio::test]
async fn health_reports_ok() {
    let response = app(FixedTagger(vec![]), Constant("Neutral"))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: HealthResponse = serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn predict_returns_the_analysis() {
    let text = "Superonline kullanıcısıyım, @Turkcell çekmiyor";
    let tagger = FixedTagger(vec![RawTag::new("ORG", "Superonline", Span::new(0, 11))]);

    let response = app(tagger, Constant("Negative"))
        .oneshot(predict_request("/predict/", &serde_json::json!({ "text": text }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({
            "entity_list": ["Superonline", "@Turkcell"],
            "results": [
                { "entity": "Superonline", "sentiment": "olumsuz" },
                { "entity": "@Turkcell", "sentiment": "olumsuz" }
            ]
        })
    );
}

#[tokio::test]
async fn predict_without_trailing_slash_is_routed() {
    let response = app(FixedTagger(vec![]), Constant("Positive"))
        .oneshot(predict_request("/predict", r#"{"text": "düz bir cümle"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "entity_list": [], "results": [] })
    );
}

#[tokio::test]
async fn classifier_failure_is_a_server_error() {
    let response = app(FixedTagger(vec![]), Crashing)
        .oneshot(predict_request("/predict/", r#"{"text": "@Kick yavaş"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = serde_json::from_value(json_body(response).await).unwrap();
    assert!(body.error.contains("weights went missing"));
}

#[tokio::test]
async fn oversized_input_is_unprocessable() {
    let response = app(TooLong, Constant("Neutral"))
        .oneshot(predict_request("/predict/", r#"{"text": "çok uzun"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = serde_json::from_value(json_body(response).await).unwrap();
    assert!(body.error.contains("512"));
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let response = app(FixedTagger(vec![]), Constant("Neutral"))
        .oneshot(predict_request("/predict/", r#"{"message": "yanlış alan"}"#))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
