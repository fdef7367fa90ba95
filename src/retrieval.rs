//! Retrieval orchestration: resolve the query, then walk to the nearest goal.

use crate::entity_resolver::resolve;
use crate::graph_store::GraphStore;
use crate::path_finder::find_path;
use crate::types::{NodePath, RetrievalError, RetrievalResult};
use tracing::{info, instrument};

/// Resolves `query` and returns the shortest chain to a goal node.
///
/// A store without goal nodes fails with [RetrievalError::NoGoals] before the
/// query is looked at.
pub fn try_retrieve(store: &GraphStore, query: &str) -> Result<NodePath, RetrievalError> {
  if store.goal_nodes().next().is_none() {
    return Err(RetrievalError::NoGoals);
  }
  let start = resolve(query, store)?;
  find_path(store, start)
}

/// Like [try_retrieve], folding every failure into a [RetrievalResult].
#[instrument(level = "trace", skip(store))]
pub fn retrieve(store: &GraphStore, query: &str) -> RetrievalResult {
  let result = RetrievalResult::from(try_retrieve(store, query));
  match &result {
    RetrievalResult::Found { path } => info!(hops = path.len() - 1, "path found"),
    RetrievalResult::NotFound { reason, .. } => info!(%reason, "no path"),
  }
  result
}
