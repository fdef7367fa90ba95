//! Category tag carried by every graph node.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a node. `Goal` nodes are the destinations of path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
  Goal,
  #[default]
  Other,
}

impl NodeCategory {
  pub fn is_goal(self) -> bool {
    self == NodeCategory::Goal
  }

  /// Merges a newly observed category into the current one. `Goal` is sticky.
  pub fn merge(self, observed: NodeCategory) -> NodeCategory {
    if self.is_goal() || observed.is_goal() {
      NodeCategory::Goal
    } else {
      NodeCategory::Other
    }
  }
}

impl fmt::Display for NodeCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NodeCategory::Goal => write!(f, "goal"),
      NodeCategory::Other => write!(f, "other"),
    }
  }
}
