//! HTTP routes driven in-process through the axum router.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tinfoil::config::Config;
use tinfoil::narrator::{NarrativeError, Narrator};
use tinfoil::server::{AppState, router};
use tinfoil::{GoalRule, build_store};
use tower::ServiceExt;

/// Echoes its inputs instead of calling a model.
#[derive(Default)]
struct EchoNarrator {
  calls: AtomicUsize,
  last_image: Mutex<Vec<u8>>,
}

#[async_trait]
impl Narrator for EchoNarrator {
  async fn theory(&self, path: &[String], model: &str) -> Result<String, NarrativeError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Ok(format!("[{model}] {}", path.join(" -> ")))
  }

  async fn describe_image(&self, image: &[u8], model: &str) -> Result<String, NarrativeError> {
    *self.last_image.lock().unwrap() = image.to_vec();
    Ok(format!("[{model}] {} bytes", image.len()))
  }
}

struct DownNarrator;

#[async_trait]
impl Narrator for DownNarrator {
  async fn theory(&self, _path: &[String], _model: &str) -> Result<String, NarrativeError> {
    Err(NarrativeError::Status {
      status: 503,
      body: "offline".to_string(),
    })
  }

  async fn describe_image(&self, _image: &[u8], _model: &str) -> Result<String, NarrativeError> {
    Err(NarrativeError::Status {
      status: 503,
      body: "offline".to_string(),
    })
  }
}

fn state(narrator: Arc<dyn Narrator>) -> AppState {
  let store = build_store(
    &[
      "Toaster is made of Fluoride.",
      "Fluoride is a byproduct of The Illuminati.",
    ],
    &GoalRule::from_names(["The Illuminati"]),
  );
  AppState::new(store, narrator, &Config::default())
}

async fn body_json(resp: axum::response::Response) -> Value {
  let bytes = resp.into_body().collect().await.unwrap().to_bytes();
  serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
  Request::builder()
    .method("POST")
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(body.to_string()))
    .unwrap()
}

#[tokio::test]
async fn graph_data_lists_nodes_and_links() {
  let app = router(state(Arc::new(EchoNarrator::default())));
  let resp = app
    .oneshot(Request::get("/graph_data").body(Body::empty()).unwrap())
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let v = body_json(resp).await;
  assert_eq!(v["nodes"].as_array().unwrap().len(), 3);
  assert_eq!(v["nodes"][2], json!({"id": "The Illuminati", "group": 1, "val": 2}));
  assert_eq!(v["links"][0], json!({"source": "Toaster", "target": "Fluoride"}));
}

#[tokio::test]
async fn query_hit_returns_path_and_narrative() {
  let narrator = Arc::new(EchoNarrator::default());
  let app = router(state(narrator.clone()));
  let resp = app
    .oneshot(post_json("/query", json!({"query": "my toaster"})))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let v = body_json(resp).await;
  assert_eq!(v["found"], json!(true));
  assert_eq!(v["path"], json!(["Toaster", "Fluoride", "The Illuminati"]));
  assert_eq!(
    v["explanation"],
    json!("[llama3.2] Toaster -> Fluoride -> The Illuminati")
  );
  assert_eq!(narrator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn query_model_override() {
  let app = router(state(Arc::new(EchoNarrator::default())));
  let resp = app
    .oneshot(post_json("/query", json!({"query": "fluoride", "model": "mistral"})))
    .await
    .unwrap();
  let v = body_json(resp).await;
  assert_eq!(v["explanation"], json!("[mistral] Fluoride -> The Illuminati"));
}

#[tokio::test]
async fn query_miss_skips_narrative() {
  let narrator = Arc::new(EchoNarrator::default());
  let app = router(state(narrator.clone()));
  let resp = app
    .oneshot(post_json("/query", json!({"query": "Spaceship"})))
    .await
    .unwrap();
  let v = body_json(resp).await;
  assert_eq!(v["found"], json!(false));
  assert_eq!(v["path"], json!([]));
  assert!(v["explanation"].as_str().unwrap().contains("'Spaceship'"));
  assert_eq!(narrator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn narrative_failure_still_returns_path() {
  let app = router(state(Arc::new(DownNarrator)));
  let resp = app
    .oneshot(post_json("/query", json!({"query": "toaster"})))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let v = body_json(resp).await;
  assert_eq!(v["found"], json!(true));
  assert_eq!(v["path"].as_array().unwrap().len(), 3);
  assert!(v["explanation"].as_str().unwrap().starts_with("ERROR:"));
}

const BOUNDARY: &str = "tinfoil-boundary";

fn upload(field: &str, data: &[u8]) -> Request<Body> {
  let mut body = format!(
    "--{BOUNDARY}\r\n\
     Content-Disposition: form-data; name=\"{field}\"; filename=\"evidence.jpg\"\r\n\
     Content-Type: image/jpeg\r\n\r\n"
  )
  .into_bytes();
  body.extend_from_slice(data);
  body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
  Request::post("/analyze_image")
    .header(
      "content-type",
      format!("multipart/form-data; boundary={BOUNDARY}"),
    )
    .body(Body::from(body))
    .unwrap()
}

#[tokio::test]
async fn analyze_image_reads_file_field() {
  let narrator = Arc::new(EchoNarrator::default());
  let app = router(state(narrator.clone()));
  let jpeg_magic = [0xFF, 0xD8, 0xFF, 0xE0];
  let resp = app.oneshot(upload("file", &jpeg_magic)).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let v = body_json(resp).await;
  assert_eq!(v["description"], json!("[llava] 4 bytes"));
  assert_eq!(*narrator.last_image.lock().unwrap(), jpeg_magic);
}

#[tokio::test]
async fn analyze_image_accepts_large_photos() {
  let app = router(state(Arc::new(EchoNarrator::default())));
  let photo = vec![7u8; 5 * 1024 * 1024];
  let resp = app.oneshot(upload("file", &photo)).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let v = body_json(resp).await;
  assert_eq!(v["description"], json!(format!("[llava] {} bytes", photo.len())));
}

#[tokio::test]
async fn analyze_image_requires_file_field() {
  let narrator = Arc::new(EchoNarrator::default());
  let app = router(state(narrator.clone()));
  let resp = app.oneshot(upload("photo", b"jpeg")).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(narrator.last_image.lock().unwrap().is_empty());
}

#[tokio::test]
async fn analyze_image_rejects_empty_file() {
  let app = router(state(Arc::new(EchoNarrator::default())));
  let resp = app.oneshot(upload("file", b"")).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_image_rejects_non_multipart_body() {
  let app = router(state(Arc::new(EchoNarrator::default())));
  let req = Request::post("/analyze_image")
    .body(Body::from(vec![1u8, 2, 3]))
    .unwrap();
  let resp = app.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_counts() {
  let app = router(state(Arc::new(EchoNarrator::default())));
  let resp = app
    .oneshot(Request::get("/health").body(Body::empty()).unwrap())
    .await
    .unwrap();
  let v = body_json(resp).await;
  assert_eq!(v, json!({"status": "ok", "nodes": 3, "edges": 2}));
}
