//! Narrative and vision collaborators.
//!
//! Retrieval is finished by the time these run; their failures are turned into
//! explanation strings and never fail the query.

use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Joins a path the way prompts present it.
pub fn chain_text(path: &[String]) -> String {
  path.join(" -> ")
}

/// Builds the theory prompt for a retrieved chain.
pub fn theory_prompt(path: &[String]) -> String {
  format!(
    "You are a paranoid conspiracy theorist.\n\
     Below is a chain of connections found in a knowledge graph.\n\
     Explain how the first item causes the last.\n\n\
     The Chain: {}\n\n\
     Rules:\n\
     1. Be concise but intense.\n\
     2. Use the exact items in the chain.\n\
     3. SOUND CRAZY.\n\
     4. Do not introduce yourself; go straight to the theory.\n\n\
     Theory:",
    chain_text(path)
  )
}

pub const VISION_PROMPT: &str = "Identify the main object in this image (e.g. Toaster, Cat, Car). \
  Then, in one short sentence, say: 'This looks like a standard [Object], but there is something \
  off about its energy.'";

#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
  #[error("empty path")]
  EmptyPath,
  #[error("empty image")]
  EmptyImage,
  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),
  #[error("{0}")]
  Image(#[from] image::ImageError),
  #[error("generator returned {status}: {body}")]
  Status { status: u16, body: String },
}

/// Text generation over a retrieved path, and image description.
#[async_trait]
pub trait Narrator: Send + Sync {
  async fn theory(&self, path: &[String], model: &str) -> Result<String, NarrativeError>;

  async fn describe_image(&self, image: &[u8], model: &str) -> Result<String, NarrativeError>;
}

/// Runs [Narrator::theory], mapping failures to an explanation string.
pub async fn theory_or_explain(narrator: &dyn Narrator, path: &[String], model: &str) -> String {
  match narrator.theory(path, model).await {
    Ok(text) => text,
    Err(e) => {
      warn!(error = %e, "narrative generation failed");
      format!("ERROR: Could not connect to Ollama. Is it running? (Error: {e})")
    }
  }
}

/// Runs [Narrator::describe_image], mapping failures to an explanation string.
pub async fn describe_or_explain(narrator: &dyn Narrator, image: &[u8], model: &str) -> String {
  match narrator.describe_image(image, model).await {
    Ok(text) => text,
    Err(NarrativeError::Image(e)) => {
      warn!(error = %e, "image preparation failed");
      format!("ERROR: Image processing failed ({e})")
    }
    Err(e) => {
      warn!(error = %e, "vision generation failed");
      format!("ERROR: Vision Module Malfunction. (Error: {e})")
    }
  }
}

/// Longest side, in pixels, of an image sent to the vision model.
pub const MAX_IMAGE_SIDE: u32 = 512;

/// Decodes `bytes`, shrinks the image to fit [MAX_IMAGE_SIDE] and re-encodes
/// it as JPEG. Smaller images keep their size.
pub fn prepare_image(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
  let img = image::load_from_memory(bytes)?;
  let img = if img.width() > MAX_IMAGE_SIDE || img.height() > MAX_IMAGE_SIDE {
    img.thumbnail(MAX_IMAGE_SIDE, MAX_IMAGE_SIDE)
  } else {
    img
  };
  // JPEG has no alpha channel.
  let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
  let mut out = Cursor::new(Vec::new());
  rgb.write_to(&mut out, ImageFormat::Jpeg)?;
  Ok(out.into_inner())
}

#[derive(Serialize)]
struct GenerateOptions {
  temperature: f64,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
  model: &'a str,
  prompt: &'a str,
  stream: bool,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  images: Vec<String>,
  options: GenerateOptions,
}

#[derive(Deserialize)]
struct GenerateResponse {
  response: String,
}

/// [Narrator] backed by a local Ollama server (`POST /api/generate`).
pub struct OllamaNarrator {
  client: reqwest::Client,
  base_url: String,
}

impl OllamaNarrator {
  pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, NarrativeError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(Self {
      client,
      base_url: base_url.into().trim_end_matches('/').to_string(),
    })
  }

  async fn generate(&self, request: &GenerateRequest<'_>) -> Result<String, NarrativeError> {
    let url = format!("{}/api/generate", self.base_url);
    let response = self.client.post(&url).json(request).send().await?;
    if !response.status().is_success() {
      let status = response.status().as_u16();
      let body = response.text().await.unwrap_or_default();
      return Err(NarrativeError::Status { status, body });
    }
    let body: GenerateResponse = response.json().await?;
    Ok(body.response.trim().to_string())
  }
}

#[async_trait]
impl Narrator for OllamaNarrator {
  #[instrument(level = "trace", skip(self))]
  async fn theory(&self, path: &[String], model: &str) -> Result<String, NarrativeError> {
    if path.is_empty() {
      return Err(NarrativeError::EmptyPath);
    }
    let prompt = theory_prompt(path);
    self
      .generate(&GenerateRequest {
        model,
        prompt: &prompt,
        stream: false,
        images: Vec::new(),
        options: GenerateOptions { temperature: 0.9 },
      })
      .await
  }

  #[instrument(level = "trace", skip(self, image), fields(bytes = image.len()))]
  async fn describe_image(&self, image: &[u8], model: &str) -> Result<String, NarrativeError> {
    if image.is_empty() {
      return Err(NarrativeError::EmptyImage);
    }
    let jpeg = prepare_image(image)?;
    self
      .generate(&GenerateRequest {
        model,
        prompt: VISION_PROMPT,
        stream: false,
        images: vec![STANDARD.encode(jpeg)],
        options: GenerateOptions { temperature: 0.8 },
      })
      .await
  }
}
