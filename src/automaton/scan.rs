//! Single-pass multi-match scanning.

use super::arena::{NodeArena, NodeId};
use crate::matches::Match;
use crate::token::Token;

/// Lazy iterator over every dictionary occurrence in an input sequence.
///
/// The classic Aho-Corasick walk: on each input token, follow failure links
/// until a node with a matching edge is found (or the root is reached), then
/// step. After each step, every node on the failure chain of the current
/// node that carries a live value yields one match.
///
/// Matches come out in the order they are discovered: non-decreasing `end`,
/// and longer patterns before shorter ones among equal `end`. This order is
/// an artifact of the failure-chain walk; callers that need a canonical
/// order sort explicitly (as [`Automaton::scan`](super::Automaton::scan)
/// does).
pub struct Matches<'a, T: Token, V> {
    arena: &'a NodeArena<T, V>,
    input: &'a [T],
    /// Next input offset to consume.
    pos: usize,
    /// Current automaton state.
    node: NodeId,
    /// Cursor into the failure chain still to be reported for the current
    /// position; NONE when the chain is exhausted.
    chain: NodeId,
}

impl<'a, T: Token, V> Matches<'a, T, V> {
    pub(crate) fn new(arena: &'a NodeArena<T, V>, input: &'a [T]) -> Self {
        Matches {
            arena,
            input,
            pos: 0,
            node: NodeId::ROOT,
            chain: NodeId::NONE,
        }
    }
}

impl<'a, T: Token, V: Clone> Iterator for Matches<'a, T, V> {
    type Item = Match<T, V>;

    fn next(&mut self) -> Option<Match<T, V>> {
        loop {
            // Drain the failure chain of the node reached at the previous
            // position before consuming more input.
            while !self.chain.is_none() {
                let id = self.chain;
                let node = self.arena.node(id);
                self.chain = if id == NodeId::ROOT {
                    NodeId::NONE
                } else {
                    node.fail
                };

                if let Some(value) = &node.value {
                    let end = self.pos;
                    let start = end - node.depth as usize;
                    // A zero-length span (the empty pattern at the root)
                    // is never reported as a match.
                    if start < end {
                        return Some(Match::new(
                            start,
                            end,
                            self.input[start..end].to_vec(),
                            value.clone(),
                        ));
                    }
                }
            }

            let token = self.input.get(self.pos)?;

            // Follow failure links until some node has an edge on the
            // token; falling all the way back leaves us at the root.
            let mut node = self.node;
            loop {
                if let Some(child) = self.arena.child(node, token) {
                    node = child;
                    break;
                }
                if node == NodeId::ROOT {
                    break;
                }
                node = self.arena.node(node).fail;
            }

            self.node = node;
            self.pos += 1;
            self.chain = node;
        }
    }
}
