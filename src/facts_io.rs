//! Load fact statements from a text file, one statement per line.

use std::path::Path;
use tracing::instrument;

/// Loads statements from `path`. Blank lines and lines starting with `#` are skipped.
#[instrument(level = "trace", skip(path))]
pub fn load_facts(path: &Path) -> Result<Vec<String>, std::io::Error> {
  let text = std::fs::read_to_string(path)?;
  Ok(parse_fact_lines(&text))
}

pub(crate) fn parse_fact_lines(text: &str) -> Vec<String> {
  text
    .lines()
    .map(str::trim)
    .filter(|l| !l.is_empty() && !l.starts_with('#'))
    .map(String::from)
    .collect()
}
