//! A parsed (subject, relation, object) fact.

use serde::{Deserialize, Serialize};

/// One fact extracted from a statement: `subject --relation--> object`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
  pub subject: String,
  pub relation: String,
  pub object: String,
}

impl Triple {
  pub fn new(
    subject: impl Into<String>,
    relation: impl Into<String>,
    object: impl Into<String>,
  ) -> Self {
    Self {
      subject: subject.into(),
      relation: relation.into(),
      object: object.into(),
    }
  }
}
