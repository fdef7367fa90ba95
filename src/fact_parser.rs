//! Connector-phrase fact parser.
//!
//! Splits natural-language statements of the form `<subject> <connector> <object>`
//! into triples. Parsing is lossy: statements that do not split cleanly are
//! reported in [ParseReport::rejected] and otherwise ignored.

use crate::types::Triple;
use tracing::{debug, instrument};

/// Default connector vocabulary, in match-priority order.
pub const CONNECTORS: &[&str] = &[
  "is actually a receiver for",
  "transmits brainwaves to",
  "was built by",
  "harvests energy from",
  "is a hologram projection of",
  "contains micro-chips tracking",
  "is powered by soul energy from",
  "is made of",
  "is a byproduct of",
];

/// Why a statement produced no triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
  /// No connector phrase occurs in the statement.
  NoConnector,
  /// The winning connector occurs more than once.
  RepeatedConnector,
  /// A second, different connector also occurs.
  MultipleConnectors,
  /// Subject or object is empty after trimming.
  EmptyTerm,
}

/// A statement that was dropped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
  pub statement: String,
  pub reason: RejectReason,
}

/// Result of parsing a batch of statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
  pub triples: Vec<Triple>,
  pub rejected: Vec<Rejected>,
}

/// Parser over an ordered connector vocabulary.
#[derive(Debug, Clone)]
pub struct FactParser {
  /// Connectors padded with one space on each side so they only match between words.
  padded: Vec<String>,
}

impl Default for FactParser {
  fn default() -> Self {
    Self::new(CONNECTORS.iter().copied())
  }
}

impl FactParser {
  /// Builds a parser from connectors in priority order. Blank entries are skipped.
  pub fn new<I, S>(connectors: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let padded = connectors
      .into_iter()
      .map(|c| c.as_ref().trim().to_string())
      .filter(|c| !c.is_empty())
      .map(|c| format!(" {c} "))
      .collect();
    Self { padded }
  }

  /// Parses every statement; the order of `triples` follows the input order.
  #[instrument(level = "trace", skip_all, fields(count = statements.len()))]
  pub fn parse<S: AsRef<str>>(&self, statements: &[S]) -> ParseReport {
    let mut report = ParseReport::default();
    for s in statements {
      let s = s.as_ref();
      match self.parse_statement(s) {
        Ok(t) => report.triples.push(t),
        Err(reason) => {
          debug!(statement = s, ?reason, "dropping statement");
          report.rejected.push(Rejected {
            statement: s.to_string(),
            reason,
          });
        }
      }
    }
    report
  }

  /// Parses one statement into a triple.
  pub fn parse_statement(&self, statement: &str) -> Result<Triple, RejectReason> {
    let sentence = normalize_sentence(statement);

    let connector = self
      .padded
      .iter()
      .find(|c| sentence.contains(c.as_str()))
      .ok_or(RejectReason::NoConnector)?;
    let (left, right) = sentence
      .split_once(connector.as_str())
      .ok_or(RejectReason::NoConnector)?;

    // Re-pad each side so occurrences sharing a space with the split point are seen.
    let sides = [format!(" {left} "), format!(" {right} ")];
    if sides.iter().any(|s| s.contains(connector.as_str())) {
      return Err(RejectReason::RepeatedConnector);
    }
    if sides
      .iter()
      .any(|s| self.padded.iter().any(|c| s.contains(c.as_str())))
    {
      return Err(RejectReason::MultipleConnectors);
    }

    let subject = clean_term(left);
    let object = clean_term(right);
    if subject.is_empty() || object.is_empty() {
      return Err(RejectReason::EmptyTerm);
    }
    Ok(Triple::new(subject, connector.trim(), object))
  }
}

/// Parses with the default connector vocabulary.
pub fn parse_facts<S: AsRef<str>>(statements: &[S]) -> ParseReport {
  FactParser::default().parse(statements)
}

/// Trims the statement and removes sentence-terminating punctuation.
///
/// The result is padded with a space on each side so a connector may sit at
/// the very start or end and still be found (it then yields an empty term).
pub(crate) fn normalize_sentence(s: &str) -> String {
  let body = s.trim().trim_end_matches(['.', '!', '?']).trim_end();
  format!(" {body} ")
}

/// Trims whitespace and trailing punctuation from a subject or object.
pub(crate) fn clean_term(s: &str) -> &str {
  s.trim()
    .trim_end_matches(['.', ',', ';', ':', '!', '?'])
    .trim_end()
}
