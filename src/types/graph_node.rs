//! A node in the knowledge graph.

use super::NodeCategory;

/// A node keyed by its exact display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
  pub name: String,
  pub category: NodeCategory,
}

impl GraphNode {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      category: NodeCategory::Other,
    }
  }

  pub fn is_goal(&self) -> bool {
    self.category.is_goal()
  }
}
