//! Binary persistence for automata.
//!
//! The format is a versioned, length-prefixed dump of the node store in
//! arena order:
//!
//! ```text
//! magic   b"ACAM"
//! version u8 = 1
//! count   u32-LE                    number of nodes
//! then per node, in arena index order:
//!   depth      u32-LE
//!   value flag u8 (0|1), value bytes when 1
//!   edge count u32-LE
//!   edges      (token bytes, child u32-LE) in ascending token order
//! ```
//!
//! Failure links are deliberately not persisted: a loaded automaton starts
//! in the insertable state and recompiles them on first use, so it can
//! never be stale. Tokens and values encode through [`Serial`], which is
//! length-prefixed and delimiter-free, so patterns embedding newlines or
//! NULs round-trip byte-exactly.
//!
//! Decoding is all-or-nothing: every structural invariant of the trie is
//! re-validated, and any violation yields [`Error::CorruptData`] with no
//! automaton constructed.

use std::fs;
use std::path::Path;

use log::debug;
use smallvec::SmallVec;

use crate::automaton::{Automaton, Node, NodeArena, NodeId};
use crate::error::{Error, Result};
use crate::serial::{Reader, Serial};
use crate::token::Token;

const MAGIC: &[u8; 4] = b"ACAM";
const VERSION: u8 = 1;

impl<T: Token + Serial, V: Serial> Automaton<T, V> {
    /// Encode the automaton to a byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(MAGIC);
        out.push(VERSION);
        (self.arena.len() as u32).write_bytes(&mut out);

        for index in 0..self.arena.len() {
            let node = self.arena.node(NodeId::from_index(index));
            node.depth.write_bytes(&mut out);
            match &node.value {
                Some(value) => {
                    out.push(1);
                    value.write_bytes(&mut out);
                }
                None => out.push(0),
            }
            (node.edges.len() as u32).write_bytes(&mut out);
            for (token, child) in &node.edges {
                token.write_bytes(&mut out);
                (child.index() as u32).write_bytes(&mut out);
            }
        }

        debug!(
            "serialized automaton: {} nodes, {} bytes",
            self.arena.len(),
            out.len()
        );
        out
    }

    /// Decode an automaton from bytes produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut r = Reader::new(bytes);

        let magic = r.take(4)?;
        if magic != MAGIC {
            return Err(Error::corrupt(0, "bad magic"));
        }
        let version = r.u8()?;
        if version != VERSION {
            return Err(Error::corrupt(4, format!("unsupported version {}", version)));
        }
        let count = r.u32()? as usize;
        if count == 0 {
            return Err(Error::corrupt(r.pos(), "node count is zero"));
        }
        // Every node record is at least 9 bytes (depth, flag, edge count).
        if count > bytes.len() / 9 {
            return Err(Error::corrupt(r.pos(), "node count exceeds stream size"));
        }

        let mut nodes: Vec<Node<T, V>> = Vec::with_capacity(count);
        let mut len = 0usize;
        for index in 0..count {
            let depth = r.u32()?;
            if index == 0 && depth != 0 {
                return Err(Error::corrupt(r.pos(), "root depth is not zero"));
            }

            let flag = r.u8()?;
            let value = match flag {
                0 => None,
                1 => {
                    len += 1;
                    Some(V::read_bytes(&mut r)?)
                }
                _ => return Err(Error::corrupt(r.pos() - 1, "bad value flag")),
            };

            let edge_count = r.u32()? as usize;
            let mut edges: SmallVec<[(T, NodeId); 4]> = SmallVec::with_capacity(edge_count);
            for _ in 0..edge_count {
                let token = T::read_bytes(&mut r)?;
                let child_offset = r.pos();
                let child = r.u32()? as usize;
                if child == 0 || child >= count {
                    return Err(Error::corrupt(child_offset, "child index out of range"));
                }
                if let Some((prev, _)) = edges.last() {
                    if *prev >= token {
                        return Err(Error::corrupt(child_offset, "edges not in ascending order"));
                    }
                }
                edges.push((token, NodeId::from_index(child)));
            }

            let mut node = Node::new(depth);
            node.value = value;
            node.edges = edges;
            nodes.push(node);
        }

        if !r.is_empty() {
            return Err(Error::corrupt(r.pos(), "trailing bytes after last node"));
        }

        // Structural validation: the edges must form a tree rooted at node
        // 0, with child depths one greater than their parent's.
        let mut referenced = vec![false; count];
        referenced[0] = true;
        for (index, node) in nodes.iter().enumerate() {
            for (_, child) in &node.edges {
                let c = child.index();
                if referenced[c] {
                    return Err(Error::corrupt(r.pos(), "node has more than one parent"));
                }
                referenced[c] = true;
                if nodes[c].depth != node.depth + 1 {
                    return Err(Error::corrupt(r.pos(), "child depth mismatch"));
                }
                if c <= index {
                    return Err(Error::corrupt(r.pos(), "edge points backward in arena"));
                }
            }
        }
        if let Some(orphan) = referenced.iter().position(|seen| !seen) {
            return Err(Error::corrupt(
                r.pos(),
                format!("unreachable node {}", orphan),
            ));
        }

        debug!("deserialized automaton: {} nodes, {} patterns", count, len);
        Ok(Automaton::from_parts(NodeArena::from_nodes(nodes), len))
    }

    /// Write the serialized automaton to a file. Thin wrapper over
    /// [`to_bytes`](Self::to_bytes).
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_bytes())?;
        Ok(())
    }

    /// Load an automaton from a file written by
    /// [`save_to_path`](Self::save_to_path).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}
