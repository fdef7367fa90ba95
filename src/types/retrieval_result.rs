//! Outcome of one retrieval query.

use serde::{Serialize, Serializer};

use super::{FailureReason, NodePath, RetrievalError};

/// Outcome of [crate::retrieve]: a path to a goal, or a structured miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalResult {
  Found {
    path: NodePath,
  },
  NotFound {
    reason: FailureReason,
    message: String,
  },
}

impl RetrievalResult {
  pub fn found(&self) -> bool {
    matches!(self, RetrievalResult::Found { .. })
  }

  pub fn path(&self) -> Option<&[String]> {
    match self {
      RetrievalResult::Found { path } => Some(path),
      RetrievalResult::NotFound { .. } => None,
    }
  }

  pub fn reason(&self) -> Option<FailureReason> {
    match self {
      RetrievalResult::Found { .. } => None,
      RetrievalResult::NotFound { reason, .. } => Some(*reason),
    }
  }

  pub fn message(&self) -> Option<&str> {
    match self {
      RetrievalResult::Found { .. } => None,
      RetrievalResult::NotFound { message, .. } => Some(message),
    }
  }
}

impl From<Result<NodePath, RetrievalError>> for RetrievalResult {
  fn from(r: Result<NodePath, RetrievalError>) -> Self {
    match r {
      Ok(path) => RetrievalResult::Found { path },
      Err(e) => RetrievalResult::NotFound {
        reason: e.reason(),
        message: e.to_string(),
      },
    }
  }
}

/// Flat wire shape: `{found, path}` or `{found, reason, message}`.
#[derive(Serialize)]
struct Wire<'a> {
  found: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  path: Option<&'a [String]>,
  #[serde(skip_serializing_if = "Option::is_none")]
  reason: Option<FailureReason>,
  #[serde(skip_serializing_if = "Option::is_none")]
  message: Option<&'a str>,
}

impl Serialize for RetrievalResult {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    Wire {
      found: self.found(),
      path: self.path(),
      reason: self.reason(),
      message: self.message(),
    }
    .serialize(serializer)
  }
}
