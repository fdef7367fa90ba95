//! HTTP surface: graph export, retrieval + narrative, image description.

use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::export::GraphExport;
use crate::graph_store::GraphStore;
use crate::narrator::{Narrator, describe_or_explain, theory_or_explain};
use crate::retrieval::retrieve;
use crate::types::RetrievalResult;

/// Multipart field that carries the uploaded image.
pub const IMAGE_FIELD: &str = "file";

/// Upload ceiling for `/analyze_image`; axum's default is 2 MB.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Shared, read-only service state.
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<GraphStore>,
  pub narrator: Arc<dyn Narrator>,
  pub model: String,
  pub vision_model: String,
}

impl AppState {
  pub fn new(store: GraphStore, narrator: Arc<dyn Narrator>, config: &Config) -> Self {
    Self {
      store: Arc::new(store),
      narrator,
      model: config.model.clone(),
      vision_model: config.vision_model.clone(),
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
  pub query: String,
  /// Overrides the configured narrative model.
  #[serde(default)]
  pub model: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
  pub found: bool,
  pub explanation: String,
  pub path: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageResponse {
  pub description: String,
}

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/graph_data", get(graph_data))
    .route("/query", post(query))
    .route(
      "/analyze_image",
      post(analyze_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
    )
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
  Json(json!({
    "status": "ok",
    "nodes": state.store.node_count(),
    "edges": state.store.edge_count(),
  }))
}

async fn graph_data(State(state): State<AppState>) -> Json<GraphExport> {
  Json(GraphExport::from_store(&state.store))
}

#[instrument(level = "trace", skip(state))]
async fn query(
  State(state): State<AppState>,
  Json(req): Json<QueryRequest>,
) -> Json<QueryResponse> {
  // Retrieval completes before any narrative call; the store is only read.
  let response = match retrieve(&state.store, &req.query) {
    RetrievalResult::Found { path } => {
      let model = req.model.as_deref().unwrap_or(&state.model);
      let explanation = theory_or_explain(state.narrator.as_ref(), &path, model).await;
      QueryResponse {
        found: true,
        explanation,
        path,
      }
    }
    RetrievalResult::NotFound { message, .. } => QueryResponse {
      found: false,
      explanation: message,
      path: Vec::new(),
    },
  };
  Json(response)
}

type Rejection = (StatusCode, Json<Value>);

fn bad_request(detail: impl Into<String>) -> Rejection {
  (StatusCode::BAD_REQUEST, Json(json!({"detail": detail.into()})))
}

/// Pulls the bytes of the [IMAGE_FIELD] part; other parts are skipped.
async fn image_field(multipart: &mut Multipart) -> Result<Bytes, Rejection> {
  let reject = |e: axum::extract::multipart::MultipartError| {
    (e.status(), Json(json!({"detail": e.body_text()})))
  };
  while let Some(field) = multipart.next_field().await.map_err(reject)? {
    if field.name() != Some(IMAGE_FIELD) {
      continue;
    }
    let bytes = field.bytes().await.map_err(reject)?;
    if bytes.is_empty() {
      return Err(bad_request("empty image upload"));
    }
    return Ok(bytes);
  }
  Err(bad_request(format!("missing '{IMAGE_FIELD}' field")))
}

async fn analyze_image(
  State(state): State<AppState>,
  mut multipart: Multipart,
) -> Result<Json<ImageResponse>, Rejection> {
  let image = image_field(&mut multipart).await?;
  let description =
    describe_or_explain(state.narrator.as_ref(), &image, &state.vision_model).await;
  Ok(Json(ImageResponse { description }))
}

/// Resolves when `signal` fires. If the signal cannot be awaited the error is
/// logged and this never resolves, so the server keeps running.
pub(crate) async fn until_signal(signal: impl Future<Output = std::io::Result<()>>) {
  if let Err(e) = signal.await {
    warn!(error = %e, "shutdown signal unavailable, serving until killed");
    std::future::pending::<()>().await;
  }
}

/// Binds `config.bind` and serves until ctrl-c.
pub async fn serve(config: &Config, state: AppState) -> std::io::Result<()> {
  let listener = tokio::net::TcpListener::bind(config.bind).await?;
  info!(addr = %config.bind, nodes = state.store.node_count(), "serving");
  axum::serve(listener, router(state))
    .with_graceful_shutdown(until_signal(tokio::signal::ctrl_c()))
    .await
}
