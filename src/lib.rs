//! acmap: Aho-Corasick multi-pattern matching over generic token sequences.
//!
//! Build a dictionary of patterns (each a sequence of [`Token`]s: chars,
//! bytes, words, event codes), then scan an input once and get every
//! dictionary occurrence in time proportional to input length plus match
//! count. The automaton also behaves as an ordered map from pattern to
//! value, answers prefix queries, and persists to a compact binary form.
//!
//! ```
//! use acmap::Automaton;
//!
//! let mut auto: Automaton<char, &str> = Automaton::new();
//! for (pattern, value) in [("he", "HE"), ("she", "SHE"), ("his", "HIS"), ("hers", "HERS")] {
//!     let tokens: Vec<char> = pattern.chars().collect();
//!     auto.insert(&tokens, value);
//! }
//!
//! let input: Vec<char> = "ushers".chars().collect();
//!
//! // Every occurrence, nested and overlapping ones included:
//! let all = auto.scan(&input, false);
//! let spans: Vec<(usize, usize)> = all.iter().map(|m| (m.start, m.end)).collect();
//! assert_eq!(spans, vec![(1, 4), (2, 4), (2, 6)]);
//!
//! // Or a greedy non-overlapping cover:
//! let picked = auto.scan(&input, true);
//! assert_eq!(picked.len(), 1);
//! ```
//!
//! Insertions never rebuild the automaton; failure links are recomputed
//! lazily the next time a scan needs them. Ordered traversal
//! ([`Automaton::items`], [`Automaton::prefixes`]) and the map-style API
//! ([`Automaton::get`], [`Automaton::remove`]) only walk trie edges and
//! never trigger a rebuild.

mod automaton;
mod error;
mod matches;
mod serial;
mod serialize;
mod token;

pub use automaton::{Automaton, Items, Matches, Prefixes};
pub use error::{Error, Result};
pub use matches::{remove_overlaps, Match};
pub use serial::{Reader, Serial};
pub use token::Token;
