//! End-to-end retrieval scenarios through the public API.

use std::sync::Arc;
use std::thread;

use tinfoil::{FailureReason, GoalRule, build_store, retrieve};

fn illuminati_rule() -> GoalRule {
  GoalRule::from_names(["The Illuminati"])
}

#[test]
fn toaster_chain() {
  let store = build_store(
    &[
      "Toaster is made of Fluoride.",
      "Fluoride is a byproduct of The Illuminati.",
    ],
    &illuminati_rule(),
  );
  let names: Vec<_> = store.nodes().map(|n| n.name.as_str()).collect();
  assert_eq!(names, ["Toaster", "Fluoride", "The Illuminati"]);
  assert!(store.node("The Illuminati").unwrap().is_goal());

  let r = retrieve(&store, "toaster");
  assert!(r.found());
  assert_eq!(r.path().unwrap(), ["Toaster", "Fluoride", "The Illuminati"]);

  let r = retrieve(&store, "Spaceship");
  assert!(!r.found());
  assert_eq!(r.reason(), Some(FailureReason::NoMatch));
}

#[test]
fn empty_store_reports_no_goals() {
  let store = build_store::<&str>(&[], &illuminati_rule());
  let r = retrieve(&store, "toaster");
  assert!(!r.found());
  assert_eq!(r.reason(), Some(FailureReason::NoGoals));
}

#[test]
fn shortest_chain_across_several_goals() {
  let store = build_store(
    &[
      "5G Tower transmits brainwaves to Pigeon.",
      "Pigeon is made of Plastic.",
      "Plastic is a byproduct of Lizard People.",
      "Tower was built by Bigfoot.",
      "Pigeon harvests energy from The Deep State.",
    ],
    &GoalRule::from_names(["Lizard People", "Bigfoot", "The Deep State"]),
  );
  let r = retrieve(&store, "My 5G Tower is broken");
  assert_eq!(r.path().unwrap(), ["5G Tower", "Pigeon", "The Deep State"]);
}

#[test]
fn concurrent_reads_share_one_store() {
  let store = Arc::new(build_store(
    &[
      "Cat is made of Oxygen.",
      "Oxygen is a byproduct of The Matrix.",
    ],
    &GoalRule::from_names(["The Matrix"]),
  ));
  let handles: Vec<_> = (0..8)
    .map(|_| {
      let store = Arc::clone(&store);
      thread::spawn(move || retrieve(&store, "cat"))
    })
    .collect();
  for h in handles {
    let r = h.join().unwrap();
    assert_eq!(r.path().unwrap(), ["Cat", "Oxygen", "The Matrix"]);
  }
}
