//! Shortest directed path from a start node to the nearest goal node.

use std::collections::VecDeque;

use crate::graph_store::GraphStore;
use crate::types::{NodePath, RetrievalError};
use tracing::{debug, instrument};

/// Finds the shortest directed path from `start` to any goal-category node.
///
/// Goal nodes are considered in first-seen order and the first one reached at
/// the minimum distance wins. A goal `start` yields the one-node path.
#[instrument(level = "trace", skip(store))]
pub fn find_path(store: &GraphStore, start: &str) -> Result<NodePath, RetrievalError> {
  if store.goal_nodes().next().is_none() {
    return Err(RetrievalError::NoGoals);
  }
  let start = store.index_of(start).ok_or(RetrievalError::NoPath)?;
  let parents = bfs_parents(store, start);

  let mut best: Option<(usize, usize)> = None;
  for target in (0..store.node_count()).filter(|&i| store.is_goal_at(i)) {
    let Some(len) = path_len(&parents, start, target) else {
      continue;
    };
    if best.is_none_or(|(_, best_len)| len < best_len) {
      best = Some((target, len));
    }
  }

  let (target, len) = best.ok_or(RetrievalError::NoPath)?;
  debug!(goal = store.name_at(target), len, "goal reached");
  Ok(walk_back(store, &parents, start, target))
}

/// BFS over outgoing edges. `parents[i]` is the node `i` was first reached from;
/// the start is its own parent. Unreached nodes are `None`.
pub(crate) fn bfs_parents(store: &GraphStore, start: usize) -> Vec<Option<usize>> {
  let mut parents = vec![None; store.node_count()];
  parents[start] = Some(start);
  let mut queue = VecDeque::from([start]);
  while let Some(node) = queue.pop_front() {
    for next in store.successors(node) {
      if parents[next].is_none() {
        parents[next] = Some(node);
        queue.push_back(next);
      }
    }
  }
  parents
}

/// Number of nodes on the BFS path to `target`, or `None` if unreached.
fn path_len(parents: &[Option<usize>], start: usize, target: usize) -> Option<usize> {
  parents[target]?;
  let mut len = 1;
  let mut at = target;
  while at != start {
    at = parents[at]?;
    len += 1;
  }
  Some(len)
}

fn walk_back(
  store: &GraphStore,
  parents: &[Option<usize>],
  start: usize,
  target: usize,
) -> NodePath {
  let mut path = vec![store.name_at(target).to_string()];
  let mut at = target;
  while at != start {
    match parents[at] {
      Some(p) => at = p,
      None => break,
    }
    path.push(store.name_at(at).to_string());
  }
  path.reverse();
  path
}
