//! A directed, labeled edge between two named nodes.

/// A directed edge `source -> target` labeled with the connector relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge<'a> {
  pub source: &'a str,
  pub target: &'a str,
  pub relation: &'a str,
}
