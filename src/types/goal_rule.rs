//! Caller-supplied classification of goal-category nodes.

use std::collections::HashSet;

use super::{NodeCategory, Triple};

/// Decides which triple objects become goal nodes.
///
/// An object is a goal when its exact name is whitelisted, or when the
/// triple's relation is one of the terminal relations.
#[derive(Debug, Clone, Default)]
pub struct GoalRule {
  names: HashSet<String>,
  relations: HashSet<String>,
}

impl GoalRule {
  /// Rule that whitelists the given goal names.
  pub fn from_names<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self::default().with_names(names)
  }

  pub fn with_names<I, S>(mut self, names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.names.extend(names.into_iter().map(Into::into));
    self
  }

  /// Adds relations whose objects are always goals.
  pub fn with_relations<I, S>(mut self, relations: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .relations
      .extend(relations.into_iter().map(|r| r.into().trim().to_string()));
    self
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty() && self.relations.is_empty()
  }

  /// Category the triple's object should receive.
  pub fn classify(&self, triple: &Triple) -> NodeCategory {
    if self.names.contains(&triple.object) || self.relations.contains(&triple.relation) {
      NodeCategory::Goal
    } else {
      NodeCategory::Other
    }
  }
}
