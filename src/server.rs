//! HTTP service around [`EntitySentimentPipeline`].
//!
//! | Route | |
//! |-------|-|
//! | `GET /` | demo page |
//! | `POST /predict/` | `{"text": "..."}` → [`Analysis`] |
//! | `GET /health` | liveness and version |

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::entity_sentiment::{Analysis, EntitySentimentPipeline, SentimentClassifier, Tagger};
use crate::error::PipelineError;

/// Body of `POST /predict/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Text to analyze.
    pub text: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Error body returned with every non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable cause.
    pub error: String,
}

/// Failure of a request, rendered as [`ErrorResponse`].
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        let status = match err {
            PipelineError::Tokenization(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

type SharedPipeline<T, C> = Arc<EntitySentimentPipeline<T, C>>;

/// Builds the service routes over a shared pipeline.
pub fn router<T, C>(pipeline: SharedPipeline<T, C>) -> Router
where
    T: Tagger + 'static,
    C: SentimentClassifier + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/predict", post(predict::<T, C>))
        .route("/predict/", post(predict::<T, C>))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(pipeline)
}

/// Serves `router` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    info!(addr = ?listener.local_addr()?, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn predict<T, C>(
    State(pipeline): State<SharedPipeline<T, C>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<Analysis>, ApiError>
where
    T: Tagger + 'static,
    C: SentimentClassifier + 'static,
{
    // Inference is CPU/GPU bound; keep it off the async workers.
    let analysis = tokio::task::spawn_blocking(move || pipeline.analyze(&request.text))
        .await
        .map_err(|e| ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Analysis task failed: {e}"),
        })?
        .map_err(|e| {
            error!(error = %e, "analysis failed");
            ApiError::from(e)
        })?;

    Ok(Json(analysis))
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="tr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Metin Analizi</title>
</head>
<body>
    <h1>Metin Analizi</h1>
    <form id="analysisForm">
        <label for="text">Metin:</label><br>
        <textarea id="text" name="text" rows="4" cols="50"></textarea><br><br>
        <input type="submit" value="Analiz Et">
    </form>
    <h2>Sonuçlar:</h2>
    <pre id="results"></pre>

    <script>
        document.getElementById('analysisForm').addEventListener('submit', async function (event) {
            event.preventDefault();
            const text = document.getElementById('text').value;
            const response = await fetch('/predict/', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ text })
            });
            const result = await response.json();
            document.getElementById('results').textContent = JSON.stringify(result, null, 2);
        });
    </script>
</body>
</html>
"#;
