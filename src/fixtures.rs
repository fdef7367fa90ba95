//! Synthetic fact generator used to seed the graph at boot.
//!
//! Produces absurd "mundane object -> conspiracy" statements from fixed
//! vocabularies, plus two-hop chains through an intermediate concept.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::types::GoalRule;

pub const MUNDANE_OBJECTS: &[&str] = &[
  "Toaster",
  "Pigeon",
  "Printer",
  "Coffee",
  "5G Tower",
  "Stop Sign",
  "Cloud",
  "Socks",
  "Microwave",
  "Cat",
];

pub const CONSPIRACIES: &[&str] = &[
  "The Illuminati",
  "Bigfoot",
  "The Moon Landing Set",
  "Ancient Aliens",
  "The Deep State",
  "Lizard People",
  "The Matrix",
  "Time Travelers",
];

pub const INTERMEDIATES: &[&str] = &["Fluoride", "Chemtrails", "Bitcoin", "Oxygen", "Plastic"];

/// Connectors used for direct mundane -> conspiracy statements.
pub const DIRECT_CONNECTORS: &[&str] = &[
  "is actually a receiver for",
  "transmits brainwaves to",
  "was built by",
  "harvests energy from",
  "is a hologram projection of",
  "contains micro-chips tracking",
  "is powered by soul energy from",
];

pub const DIRECT_FACTS: usize = 15;
pub const CHAINED_FACTS: usize = 10;

/// Goal rule that whitelists every conspiracy in the vocabulary.
pub fn default_goal_rule() -> GoalRule {
  GoalRule::from_names(CONSPIRACIES.iter().copied())
}

/// Generates `DIRECT_FACTS` direct statements followed by `CHAINED_FACTS`
/// two-statement chains.
pub fn generate_facts<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
  let mut facts = Vec::with_capacity(DIRECT_FACTS + 2 * CHAINED_FACTS);
  for _ in 0..DIRECT_FACTS {
    let s = pick(rng, MUNDANE_OBJECTS);
    let p = pick(rng, DIRECT_CONNECTORS);
    let o = pick(rng, CONSPIRACIES);
    facts.push(format!("{s} {p} {o}."));
  }
  for _ in 0..CHAINED_FACTS {
    let s = pick(rng, MUNDANE_OBJECTS);
    let i = pick(rng, INTERMEDIATES);
    let o = pick(rng, CONSPIRACIES);
    facts.push(format!("{s} is made of {i}."));
    facts.push(format!("{i} is a byproduct of {o}."));
  }
  facts
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, from: &[&'a str]) -> &'a str {
  from.choose(rng).copied().unwrap_or_default()
}
