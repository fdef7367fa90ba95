//! Node/link export for force-directed graph rendering.

use serde::{Deserialize, Serialize};

use crate::graph_store::GraphStore;

/// Render group for goal nodes.
pub const GOAL_GROUP: u8 = 1;
/// Render group for every other node.
pub const OTHER_GROUP: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNode {
  pub id: String,
  pub group: u8,
  /// Relative render size.
  pub val: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLink {
  pub source: String,
  pub target: String,
}

/// `{nodes: [{id, group, val}], links: [{source, target}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
  pub nodes: Vec<ExportNode>,
  pub links: Vec<ExportLink>,
}

impl GraphExport {
  pub fn from_store(store: &GraphStore) -> Self {
    let nodes = store
      .nodes()
      .map(|n| {
        let (group, val) = if n.is_goal() {
          (GOAL_GROUP, 2)
        } else {
          (OTHER_GROUP, 1)
        };
        ExportNode {
          id: n.name.clone(),
          group,
          val,
        }
      })
      .collect();
    let links = store
      .edges()
      .map(|e| ExportLink {
        source: e.source.to_string(),
        target: e.target.to_string(),
      })
      .collect();
    Self { nodes, links }
  }
}
