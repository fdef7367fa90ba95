//! Service configuration: defaults, overridden by flags, overridden by env.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::facts_io::load_facts;
use crate::fixtures::{default_goal_rule, generate_facts};
use crate::graph_store::{GraphStore, build_store};
use crate::types::GoalRule;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_VISION_MODEL: &str = "llava";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const ENV_BIND: &str = "TINFOIL_BIND";
pub const ENV_OLLAMA_URL: &str = "TINFOIL_OLLAMA_URL";
pub const ENV_MODEL: &str = "TINFOIL_MODEL";
pub const ENV_VISION_MODEL: &str = "TINFOIL_VISION_MODEL";
pub const ENV_SEED: &str = "TINFOIL_SEED";
pub const ENV_FACTS: &str = "TINFOIL_FACTS";
pub const ENV_GOALS: &str = "TINFOIL_GOALS";
pub const ENV_TIMEOUT_SECS: &str = "TINFOIL_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("invalid bind address '{value}': {source}")]
  InvalidBind {
    value: String,
    source: std::net::AddrParseError,
  },
  #[error("invalid {name} '{value}': {source}")]
  InvalidNumber {
    name: &'static str,
    value: String,
    source: std::num::ParseIntError,
  },
  #[error("cannot read facts file {}: {source}", path.display())]
  FactsFile {
    path: PathBuf,
    source: std::io::Error,
  },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  pub bind: SocketAddr,
  pub ollama_url: String,
  pub model: String,
  pub vision_model: String,
  /// Seed for synthetic facts; random when unset.
  pub seed: Option<u64>,
  /// Statement file; synthetic facts are generated when unset.
  pub facts_path: Option<PathBuf>,
  /// Goal names; the synthetic conspiracy vocabulary when empty.
  pub goals: Vec<String>,
  pub generation_timeout: Duration,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
      ollama_url: DEFAULT_OLLAMA_URL.to_string(),
      model: DEFAULT_MODEL.to_string(),
      vision_model: DEFAULT_VISION_MODEL.to_string(),
      seed: None,
      facts_path: None,
      goals: Vec::new(),
      generation_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
  }
}

pub fn parse_bind(value: &str) -> Result<SocketAddr, ConfigError> {
  value.parse().map_err(|source| ConfigError::InvalidBind {
    value: value.to_string(),
    source,
  })
}

fn parse_u64(name: &'static str, value: &str) -> Result<u64, ConfigError> {
  value
    .trim()
    .parse()
    .map_err(|source| ConfigError::InvalidNumber {
      name,
      value: value.to_string(),
      source,
    })
}

impl Config {
  /// Overrides fields from environment variables; `var` looks a variable up.
  pub fn apply_env<F>(mut self, var: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(v) = var(ENV_BIND) {
      self.bind = parse_bind(&v)?;
    }
    if let Some(v) = var(ENV_OLLAMA_URL) {
      self.ollama_url = v;
    }
    if let Some(v) = var(ENV_MODEL) {
      self.model = v;
    }
    if let Some(v) = var(ENV_VISION_MODEL) {
      self.vision_model = v;
    }
    if let Some(v) = var(ENV_SEED) {
      self.seed = Some(parse_u64(ENV_SEED, &v)?);
    }
    if let Some(v) = var(ENV_FACTS) {
      self.facts_path = Some(PathBuf::from(v));
    }
    if let Some(v) = var(ENV_GOALS) {
      self.goals = v
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect();
    }
    if let Some(v) = var(ENV_TIMEOUT_SECS) {
      self.generation_timeout = Duration::from_secs(parse_u64(ENV_TIMEOUT_SECS, &v)?);
    }
    Ok(self)
  }

  /// Overrides fields from the process environment.
  pub fn with_env(self) -> Result<Self, ConfigError> {
    self.apply_env(|k| std::env::var(k).ok())
  }

  pub fn goal_rule(&self) -> GoalRule {
    if self.goals.is_empty() {
      default_goal_rule()
    } else {
      GoalRule::from_names(self.goals.iter().cloned())
    }
  }

  /// Statements to build the graph from: the facts file, or synthetic facts.
  pub fn statements(&self) -> Result<Vec<String>, ConfigError> {
    match &self.facts_path {
      Some(path) => load_facts(path).map_err(|source| ConfigError::FactsFile {
        path: path.clone(),
        source,
      }),
      None => {
        let mut rng = match self.seed {
          Some(seed) => StdRng::seed_from_u64(seed),
          None => StdRng::from_entropy(),
        };
        Ok(generate_facts(&mut rng))
      }
    }
  }

  /// Builds the graph this configuration describes.
  pub fn load_store(&self) -> Result<GraphStore, ConfigError> {
    let statements = self.statements()?;
    let store = build_store(&statements, &self.goal_rule());
    info!(
      facts = statements.len(),
      nodes = store.node_count(),
      edges = store.edge_count(),
      "graph loaded"
    );
    Ok(store)
  }
}
