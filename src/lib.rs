//! # tinfoil
//!
//! Knowledge-graph retrieval: turn connector-phrase statements into a directed
//! graph, resolve a free-text query to one node, and return the shortest chain
//! of facts from it to the nearest goal-category node.
//!
//! ## Architecture
//!
//! - [fact_parser]: statements → triples (lossy, rejects reported).
//! - [graph_store]: triples → immutable [GraphStore].
//! - [entity_resolver]: query → node name.
//! - [path_finder]: node → shortest path to a goal.
//! - [retrieval]: the `retrieve(store, query)` entry point.
//!
//! Around the core: synthetic [fixtures], [export] for visualization, the
//! Ollama [narrator], [config], and the axum [server].

pub mod config;
pub mod entity_resolver;
#[cfg(test)]
mod entity_resolver_test;
pub mod export;
pub mod fact_parser;
pub mod facts_io;
pub mod fixtures;
pub mod graph_store;
pub mod narrator;
pub mod path_finder;
pub mod retrieval;
pub mod server;
pub mod types;

pub use entity_resolver::resolve;
pub use export::GraphExport;
pub use fact_parser::{FactParser, ParseReport, parse_facts};
pub use graph_store::{GraphStore, build_store};
pub use path_finder::find_path;
pub use retrieval::{retrieve, try_retrieve};
pub use types::{
  FailureReason, GoalRule, GraphNode, NodeCategory, NodePath, RetrievalError, RetrievalResult,
  Triple,
};
