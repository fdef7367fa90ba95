//! Failure taxonomy for retrieval.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a retrieval produced no path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RetrievalError {
  /// No node matched the query exactly or as a substring.
  #[error("'{0}' is not in the system. The government wiped it.")]
  NoMatch(String),
  /// The store has no goal-category nodes.
  #[error("No conspiracies found in the database. System Error.")]
  NoGoals,
  /// The start node resolved but no goal node is reachable.
  #[error("You are safe... for now. No connection found.")]
  NoPath,
}

impl RetrievalError {
  pub fn reason(&self) -> FailureReason {
    match self {
      RetrievalError::NoMatch(_) => FailureReason::NoMatch,
      RetrievalError::NoGoals => FailureReason::NoGoals,
      RetrievalError::NoPath => FailureReason::NoPath,
    }
  }
}

/// Payload-free reason code, as exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
  NoMatch,
  NoGoals,
  NoPath,
}

impl fmt::Display for FailureReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FailureReason::NoMatch => write!(f, "no_match"),
      FailureReason::NoGoals => write!(f, "no_goals"),
      FailureReason::NoPath => write!(f, "no_path"),
    }
  }
}
