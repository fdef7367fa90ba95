//! Resolve free text to a single graph node.

use crate::graph_store::GraphStore;
use crate::types::RetrievalError;
use tracing::{debug, instrument};

/// Maps a raw query to one node name.
///
/// 1. Case-insensitive exact match on the trimmed query, first node in
///    first-seen order.
/// 2. Otherwise the longest node name contained in the query (case-insensitive),
///    so "5G Tower" wins over "Tower". Equal lengths keep first-seen order.
/// 3. Otherwise [RetrievalError::NoMatch] carrying the trimmed query.
#[instrument(level = "trace", skip(store))]
pub fn resolve<'a>(query: &str, store: &'a GraphStore) -> Result<&'a str, RetrievalError> {
  let query = query.trim();
  let needle = query.to_lowercase();

  if let Some(n) = store.nodes().find(|n| n.name.to_lowercase() == needle) {
    debug!(node = %n.name, "exact match");
    return Ok(n.name.as_str());
  }

  let mut by_length: Vec<&str> = store.nodes().map(|n| n.name.as_str()).collect();
  // Stable sort keeps first-seen order among equal lengths.
  by_length.sort_by_key(|name| std::cmp::Reverse(name.chars().count()));

  match by_length
    .into_iter()
    .find(|name| !name.is_empty() && needle.contains(&name.to_lowercase()))
  {
    Some(name) => {
      debug!(node = name, "substring match");
      Ok(name)
    }
    None => Err(RetrievalError::NoMatch(query.to_string())),
  }
}
