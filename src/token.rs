use std::fmt::Debug;

/// Trait for types that can serve as pattern and input tokens.
///
/// This trait is automatically implemented for any type satisfying all the
/// required bounds (`char`, `u8`, `u32`, `String`, etc.).
///
/// - `Clone`: patterns copy tokens into the trie; matches copy them back out
/// - `Eq + Ord`: edge lookup, deterministic child ordering, sorted traversal
/// - `Debug`: debug printing of nodes and matches
pub trait Token: Clone + Eq + Ord + Debug {}

impl<T: Clone + Eq + Ord + Debug> Token for T {}
