//! The Aho-Corasick automaton: trie construction, lazy compilation,
//! scanning, and ordered traversal.
//!
//! # Module organization
//!
//! - `arena`: index-addressed node storage (the node store)
//! - `compile`: breadth-first failure-link computation
//! - `scan`: the lazy multi-match scan iterator
//! - `traverse`: ordered pattern/prefix enumeration

mod arena;
mod compile;
mod scan;
mod traverse;

pub use arena::{Node, NodeArena, NodeId};
pub use scan::Matches;
pub use traverse::{Items, Prefixes};

use log::trace;

use crate::error::{Error, Result};
use crate::matches::{remove_overlaps, Match};
use crate::token::Token;

/// The automaton's two-state lifecycle.
///
/// Insertion demotes to `Insertable`; any operation that needs failure
/// links forces `Compiled` first, so observable behavior never depends on
/// whether the caller remembered to rebuild.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Lifecycle {
    /// At least one insertion has happened since the last compilation;
    /// failure links may be missing or stale.
    Insertable,
    /// Failure links are consistent with the trie.
    Compiled,
}

/// A multi-pattern matching automaton that doubles as an ordered map from
/// pattern to value.
///
/// Patterns are sequences of any [`Token`] type; values default to `()`
/// when only set-membership matters. Inserting is cheap (no rebuild);
/// failure links are recomputed lazily on the first scan after a mutation.
///
/// ```
/// use acmap::Automaton;
///
/// let mut auto: Automaton<char, &str> = Automaton::new();
/// let pattern: Vec<char> = "hers".chars().collect();
/// auto.insert(&pattern, "pronoun");
///
/// let input: Vec<char> = "ushers".chars().collect();
/// let matches = auto.scan(&input, true);
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].label, "pronoun");
/// assert_eq!((matches[0].start, matches[0].end), (2, 6));
/// ```
#[derive(Clone, Debug)]
pub struct Automaton<T: Token, V = ()> {
    pub(crate) arena: NodeArena<T, V>,
    pub(crate) lifecycle: Lifecycle,
    /// Count of patterns with a live value.
    pub(crate) len: usize,
}

impl<T: Token, V> Automaton<T, V> {
    /// Create an empty automaton.
    pub fn new() -> Self {
        Automaton {
            arena: NodeArena::new(),
            lifecycle: Lifecycle::Insertable,
            len: 0,
        }
    }

    pub(crate) fn from_parts(arena: NodeArena<T, V>, len: usize) -> Self {
        Automaton {
            arena,
            lifecycle: Lifecycle::Insertable,
            len,
        }
    }

    /// Insert a pattern with an attached value.
    ///
    /// Returns the previous value when the exact pattern was already
    /// present (re-insertion is an update, not an error). The empty pattern
    /// attaches its value to the root. No rebuild happens here; bulk
    /// insertion of N patterns stays linear in total pattern length.
    pub fn insert(&mut self, pattern: &[T], value: V) -> Option<V> {
        let mut node = NodeId::ROOT;
        for token in pattern {
            node = self.arena.child_or_insert(node, token);
        }
        let prev = self.arena.node_mut(node).value.replace(value);
        if prev.is_none() {
            self.len += 1;
        }
        self.lifecycle = Lifecycle::Insertable;
        trace!("inserted pattern of {} tokens", pattern.len());
        prev
    }

    /// Insert many `(pattern, value)` pairs without intermediate rebuilds.
    pub fn insert_all<P, I>(&mut self, pairs: I)
    where
        P: AsRef<[T]>,
        I: IntoIterator<Item = (P, V)>,
    {
        for (pattern, value) in pairs {
            self.insert(pattern.as_ref(), value);
        }
    }

    /// Whether the exact pattern is stored with a live value.
    ///
    /// Walks edges only; valid in either lifecycle state.
    pub fn has_pattern(&self, seq: &[T]) -> bool {
        self.arena
            .find(seq)
            .is_some_and(|id| self.arena.node(id).value.is_some())
    }

    /// Whether some inserted pattern starts with `seq` (values are
    /// irrelevant). The empty sequence is always a prefix.
    ///
    /// Walks edges only; valid in either lifecycle state.
    pub fn has_prefix(&self, seq: &[T]) -> bool {
        self.arena.find(seq).is_some()
    }

    /// Number of patterns with a live value.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the value stored for the exact pattern.
    ///
    /// Unlike [`has_pattern`](Self::has_pattern), an absent pattern is an
    /// [`Error::NotFound`], preserving both query styles.
    pub fn get(&self, pattern: &[T]) -> Result<&V> {
        self.arena
            .find(pattern)
            .and_then(|id| self.arena.node(id).value.as_ref())
            .ok_or(Error::NotFound)
    }

    /// Get the value for the pattern, or the given default when absent.
    pub fn get_or<'a>(&'a self, pattern: &[T], default: &'a V) -> &'a V {
        self.get(pattern).unwrap_or(default)
    }

    /// Remove the value stored for the exact pattern, returning it.
    ///
    /// The trie node is tombstoned, not pruned: the pattern's path remains
    /// reachable (`has_prefix` stays true) and failure links stay valid, so
    /// no recompilation is triggered. Removing an absent pattern is
    /// [`Error::NotFound`].
    pub fn remove(&mut self, pattern: &[T]) -> Result<V> {
        let id = self.arena.find(pattern).ok_or(Error::NotFound)?;
        let value = self.arena.node_mut(id).value.take().ok_or(Error::NotFound)?;
        self.len -= 1;
        Ok(value)
    }

    /// Recompute failure links now instead of at the next scan.
    ///
    /// Idempotent: always a full recomputation from scratch.
    pub fn rebuild(&mut self) {
        compile::compute_fail_links(&mut self.arena);
        self.lifecycle = Lifecycle::Compiled;
    }

    fn ensure_compiled(&mut self) {
        if self.lifecycle != Lifecycle::Compiled {
            self.rebuild();
        }
    }

    /// Lazily enumerate every dictionary occurrence in `input`, compiling
    /// first if needed.
    ///
    /// Matches arrive in discovery order (non-decreasing `end`); see
    /// [`scan`](Self::scan) for the sorted form. The iterator is finite and
    /// restartable only by calling this again.
    pub fn scan_iter<'a>(&'a mut self, input: &'a [T]) -> Matches<'a, T, V> {
        self.ensure_compiled();
        Matches::new(&self.arena, input)
    }

    /// Ordered enumeration of `(pattern, value)` for every stored pattern,
    /// lexicographic under the token ordering.
    ///
    /// Does not need failure links, so it never triggers a rebuild.
    pub fn items(&self) -> Items<'_, T, V> {
        Items::new(&self.arena)
    }

    /// Ordered enumeration of every prefix of every inserted pattern,
    /// starting with the root's empty prefix; non-terminal prefixes carry
    /// `None`.
    ///
    /// Does not need failure links, so it never triggers a rebuild.
    pub fn prefixes(&self) -> Prefixes<'_, T, V> {
        Prefixes::new(&self.arena)
    }
}

impl<T: Token, V: Clone> Automaton<T, V> {
    /// Scan `input` and return every match, sorted by `(start, end)`.
    ///
    /// With `exclude_overlaps`, the sorted list is reduced to the greedy
    /// non-overlapping cover of [`remove_overlaps`](crate::remove_overlaps).
    pub fn scan(&mut self, input: &[T], exclude_overlaps: bool) -> Vec<Match<T, V>> {
        let mut all: Vec<Match<T, V>> = self.scan_iter(input).collect();
        all.sort_unstable();
        if exclude_overlaps {
            remove_overlaps(all)
        } else {
            all
        }
    }
}

impl<T: Token, V> Default for Automaton<T, V> {
    fn default() -> Self {
        Self::new()
    }
}
