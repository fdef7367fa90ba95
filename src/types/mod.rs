//! Data types shared by the parser, graph store, and retrieval.

mod goal_rule;
mod graph_edge;
mod graph_node;
mod node_category;
mod retrieval_error;
mod retrieval_result;
mod triple;

pub use goal_rule::GoalRule;
pub use graph_edge::GraphEdge;
pub use graph_node::GraphNode;
pub use node_category::NodeCategory;
pub use retrieval_error::{FailureReason, RetrievalError};
pub use retrieval_result::RetrievalResult;
pub use triple::Triple;

/// Ordered node names from the resolved start node to a goal node.
pub type NodePath = Vec<String>;
