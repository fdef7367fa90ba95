//! Tests for `entity_resolver`.

use crate::entity_resolver::resolve;
use crate::graph_store::GraphStore;
use crate::types::{GoalRule, RetrievalError, Triple};

fn store(names: &[&str]) -> GraphStore {
  // Chain the names so each appears as a node in the given order.
  let triples: Vec<_> = names
    .windows(2)
    .map(|w| Triple::new(w[0], "is made of", w[1]))
    .collect();
  GraphStore::build(&triples, &GoalRule::default())
}

#[test]
fn exact_match_ignores_case_and_whitespace() {
  let g = store(&["Toaster", "Fluoride"]);
  assert_eq!(resolve("  toASTER ", &g), Ok("Toaster"));
}

#[test]
fn longer_substring_wins() {
  let g = store(&["Tower", "5G Tower"]);
  assert_eq!(resolve("My 5G Tower is broken", &g), Ok("5G Tower"));
}

#[test]
fn exact_beats_longer_substring() {
  let g = store(&["Category", "Cat"]);
  assert_eq!(resolve("Cat", &g), Ok("Cat"));
}

#[test]
fn substring_match_is_case_insensitive() {
  let g = store(&["Stop Sign", "Bigfoot"]);
  assert_eq!(resolve("why is that STOP SIGN staring", &g), Ok("Stop Sign"));
}

#[test]
fn equal_length_ties_keep_first_seen_order() {
  let g = store(&["Cats", "Dogs"]);
  assert_eq!(resolve("dogs and cats", &g), Ok("Cats"));
  let g = store(&["Dogs", "Cats"]);
  assert_eq!(resolve("dogs and cats", &g), Ok("Dogs"));
}

#[test]
fn node_name_must_be_inside_query_not_the_reverse() {
  let g = store(&["Microwave", "Oxygen"]);
  assert_eq!(
    resolve("Micro", &g),
    Err(RetrievalError::NoMatch("Micro".to_string()))
  );
}

#[test]
fn no_match_echoes_trimmed_query() {
  let g = store(&["Toaster", "Fluoride"]);
  assert_eq!(
    resolve(" Spaceship ", &g),
    Err(RetrievalError::NoMatch("Spaceship".to_string()))
  );
}

#[test]
fn empty_store_never_matches() {
  let g = GraphStore::default();
  assert!(matches!(resolve("Toaster", &g), Err(RetrievalError::NoMatch(_))));
}

#[test]
fn empty_query_does_not_match() {
  let g = store(&["Toaster", "Fluoride"]);
  assert!(matches!(resolve("   ", &g), Err(RetrievalError::NoMatch(_))));
}

#[test]
fn resolution_is_repeatable() {
  let g = store(&["Cloud", "Cloud Storage", "Storage"]);
  let first = resolve("my cloud storage bill", &g);
  for _ in 0..5 {
    assert_eq!(resolve("my cloud storage bill", &g), first);
  }
  assert_eq!(first, Ok("Cloud Storage"));
}
