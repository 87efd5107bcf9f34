//! Failure-link computation.
//!
//! The classic Aho-Corasick construction: a breadth-first traversal from the
//! root resolves each node's failure link using only the already-resolved
//! links of shallower nodes. Recompilation is always from scratch; rebuild
//! cost is linear in trie size, so incremental link patching is not worth
//! its complexity.

use std::collections::VecDeque;

use log::debug;

use super::arena::{NodeArena, NodeId};
use crate::token::Token;

/// Compute the failure link of every node in the arena.
///
/// The root fails to itself and depth-1 nodes fail to the root. A node
/// reached from parent `p` via token `t` fails to the `t`-child of the first
/// node on `p`'s failure chain that has one, or to the root. Idempotent:
/// every link is recomputed on each call.
pub(crate) fn compute_fail_links<T: Token, V>(arena: &mut NodeArena<T, V>) {
    arena.node_mut(NodeId::ROOT).fail = NodeId::ROOT;

    let mut queue: VecDeque<NodeId> = VecDeque::new();
    for i in 0..arena.node(NodeId::ROOT).edges.len() {
        let child = arena.node(NodeId::ROOT).edges[i].1;
        arena.node_mut(child).fail = NodeId::ROOT;
        queue.push_back(child);
    }

    while let Some(id) = queue.pop_front() {
        for i in 0..arena.node(id).edges.len() {
            let (token, child) = arena.node(id).edges[i].clone();

            // Follow the parent's failure chain to the first node with an
            // edge on this token. The chain only visits shallower nodes, so
            // their links are already resolved and the child itself can
            // never be the target.
            let mut f = arena.node(id).fail;
            let link = loop {
                if let Some(next) = arena.child(f, &token) {
                    break next;
                }
                if f == NodeId::ROOT {
                    break NodeId::ROOT;
                }
                f = arena.node(f).fail;
            };
            arena.node_mut(child).fail = link;
            queue.push_back(child);
        }
    }

    debug!("recompiled failure links for {} nodes", arena.len());
}
