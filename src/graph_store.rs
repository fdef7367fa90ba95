//! Immutable in-memory knowledge graph.
//!
//! Nodes are keyed by exact display name and enumerated in first-seen order.
//! Edges are directed, carry one relation label per ordered pair, and are
//! enumerated in first-insertion order. Nothing mutates a store after
//! [GraphStore::build] returns.

use std::collections::HashMap;

use crate::fact_parser::FactParser;
use crate::types::{GoalRule, GraphEdge, GraphNode, NodeCategory, Triple};
use tracing::{info, instrument};

/// Stored edge: indices into `GraphStore::nodes`.
#[derive(Debug, Clone)]
struct EdgeRecord {
  source: usize,
  target: usize,
  relation: String,
}

/// Directed knowledge graph built once from triples.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
  nodes: Vec<GraphNode>,
  index: HashMap<String, usize>,
  edges: Vec<EdgeRecord>,
  /// Edge ids per source node, in insertion order.
  outgoing: Vec<Vec<usize>>,
}

impl GraphStore {
  /// Builds a store from triples, tagging objects the rule classifies as goals.
  #[instrument(level = "trace", skip_all, fields(triples = triples.len()))]
  pub fn build(triples: &[Triple], rule: &GoalRule) -> Self {
    let mut store = GraphStore::default();
    for t in triples {
      let source = store.ensure_node(&t.subject);
      let target = store.ensure_node(&t.object);
      let node = &mut store.nodes[target];
      node.category = node.category.merge(rule.classify(t));
      store.upsert_edge(source, target, &t.relation);
    }
    info!(
      node_count = store.node_count(),
      edge_count = store.edge_count(),
      goal_count = store.goal_nodes().count(),
      "graph built"
    );
    store
  }

  fn ensure_node(&mut self, name: &str) -> usize {
    if let Some(&i) = self.index.get(name) {
      return i;
    }
    let i = self.nodes.len();
    self.nodes.push(GraphNode::new(name));
    self.index.insert(name.to_string(), i);
    self.outgoing.push(Vec::new());
    i
  }

  /// Adds `source -> target`, or relabels the existing edge for that pair.
  fn upsert_edge(&mut self, source: usize, target: usize, relation: &str) {
    let existing = self.outgoing[source]
      .iter()
      .copied()
      .find(|&e| self.edges[e].target == target);
    match existing {
      Some(e) => self.edges[e].relation = relation.to_string(),
      None => {
        self.outgoing[source].push(self.edges.len());
        self.edges.push(EdgeRecord {
          source,
          target,
          relation: relation.to_string(),
        });
      }
    }
  }

  /// All nodes in first-seen order.
  pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
    self.nodes.iter()
  }

  /// Goal-category nodes in first-seen order.
  pub fn goal_nodes(&self) -> impl Iterator<Item = &GraphNode> {
    self.nodes.iter().filter(|n| n.is_goal())
  }

  pub fn has_node(&self, name: &str) -> bool {
    self.index.contains_key(name)
  }

  pub fn node(&self, name: &str) -> Option<&GraphNode> {
    self.index.get(name).map(|&i| &self.nodes[i])
  }

  pub fn category(&self, name: &str) -> Option<NodeCategory> {
    self.node(name).map(|n| n.category)
  }

  /// Successors of `name` as `(target, relation)`, in edge-insertion order.
  /// Unknown names have no neighbors.
  pub fn neighbors(&self, name: &str) -> Vec<(&str, &str)> {
    match self.index.get(name) {
      Some(&i) => self.outgoing[i]
        .iter()
        .map(|&e| {
          let edge = &self.edges[e];
          (
            self.nodes[edge.target].name.as_str(),
            edge.relation.as_str(),
          )
        })
        .collect(),
      None => Vec::new(),
    }
  }

  /// Relation label on `from -> to`, if that edge exists.
  pub fn relation(&self, from: &str, to: &str) -> Option<&str> {
    let &s = self.index.get(from)?;
    let &t = self.index.get(to)?;
    self.outgoing[s]
      .iter()
      .map(|&e| &self.edges[e])
      .find(|e| e.target == t)
      .map(|e| e.relation.as_str())
  }

  /// All edges in first-insertion order.
  pub fn edges(&self) -> impl Iterator<Item = GraphEdge<'_>> {
    self.edges.iter().map(|e| GraphEdge {
      source: self.nodes[e.source].name.as_str(),
      target: self.nodes[e.target].name.as_str(),
      relation: e.relation.as_str(),
    })
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub fn edge_count(&self) -> usize {
    self.edges.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
    self.index.get(name).copied()
  }

  pub(crate) fn name_at(&self, i: usize) -> &str {
    &self.nodes[i].name
  }

  pub(crate) fn is_goal_at(&self, i: usize) -> bool {
    self.nodes[i].is_goal()
  }

  /// Successor indices of node `i`, in edge-insertion order.
  pub(crate) fn successors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
    self.outgoing[i].iter().map(|&e| self.edges[e].target)
  }
}

/// Parses `statements` with the default connector vocabulary and builds a store.
pub fn build_store<S: AsRef<str>>(statements: &[S], rule: &GoalRule) -> GraphStore {
  let report = FactParser::default().parse(statements);
  if !report.rejected.is_empty() {
    info!(
      rejected = report.rejected.len(),
      accepted = report.triples.len(),
      "some statements were not parsed"
    );
  }
  GraphStore::build(&report.triples, rule)
}
