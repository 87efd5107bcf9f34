//! Ordered enumeration of stored patterns and their prefixes.
//!
//! Both iterators run the same pre-order depth-first walk with children
//! visited in ascending token order, which enumerates patterns in
//! lexicographic order under the token ordering. Neither touches failure
//! links, so neither forces a recompilation.

use super::arena::{NodeArena, NodeId};
use crate::token::Token;

/// Shared DFS state: an explicit stack of `(node, entering token)` plus the
/// token path of the most recently visited node.
struct Walk<'a, T: Token, V> {
    arena: &'a NodeArena<T, V>,
    stack: Vec<(NodeId, Option<T>)>,
    prefix: Vec<T>,
}

impl<'a, T: Token, V> Walk<'a, T, V> {
    fn new(arena: &'a NodeArena<T, V>) -> Self {
        Walk {
            arena,
            stack: vec![(NodeId::ROOT, None)],
            prefix: Vec::new(),
        }
    }

    /// Visit the next node in pre-order; `self.prefix` holds its path.
    fn next_node(&mut self) -> Option<NodeId> {
        let (id, token) = self.stack.pop()?;
        let node = self.arena.node(id);
        match token {
            Some(t) => {
                self.prefix.truncate(node.depth as usize - 1);
                self.prefix.push(t);
            }
            None => self.prefix.clear(),
        }
        // Push children in reverse so the smallest token pops first.
        for (t, child) in node.edges.iter().rev() {
            self.stack.push((*child, Some(t.clone())));
        }
        Some(id)
    }
}

/// Lazy iterator over `(pattern, value)` for every stored pattern, in
/// lexicographic pattern order.
pub struct Items<'a, T: Token, V> {
    walk: Walk<'a, T, V>,
}

impl<'a, T: Token, V> Items<'a, T, V> {
    pub(crate) fn new(arena: &'a NodeArena<T, V>) -> Self {
        Items {
            walk: Walk::new(arena),
        }
    }
}

impl<'a, T: Token, V> Iterator for Items<'a, T, V> {
    type Item = (Vec<T>, &'a V);

    fn next(&mut self) -> Option<(Vec<T>, &'a V)> {
        loop {
            let id = self.walk.next_node()?;
            // The root's empty path is not a pattern, even when a value is
            // attached to it; the map-style API still sees that value.
            if id == NodeId::ROOT {
                continue;
            }
            if let Some(value) = self.walk.arena.node(id).value.as_ref() {
                return Some((self.walk.prefix.clone(), value));
            }
        }
    }
}

/// Lazy iterator over every prefix of every inserted pattern, root (empty
/// prefix) included. Non-terminal nodes yield `None` for the value.
pub struct Prefixes<'a, T: Token, V> {
    walk: Walk<'a, T, V>,
}

impl<'a, T: Token, V> Prefixes<'a, T, V> {
    pub(crate) fn new(arena: &'a NodeArena<T, V>) -> Self {
        Prefixes {
            walk: Walk::new(arena),
        }
    }
}

impl<'a, T: Token, V> Iterator for Prefixes<'a, T, V> {
    type Item = (Vec<T>, Option<&'a V>);

    fn next(&mut self) -> Option<(Vec<T>, Option<&'a V>)> {
        let id = self.walk.next_node()?;
        let value = self.walk.arena.node(id).value.as_ref();
        Some((self.walk.prefix.clone(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(pairs: &[(&str, &str)]) -> NodeArena<char, String> {
        let mut arena: NodeArena<char, String> = NodeArena::new();
        for (pattern, value) in pairs {
            let mut node = NodeId::ROOT;
            for c in pattern.chars() {
                node = arena.child_or_insert(node, &c);
            }
            arena.node_mut(node).value = Some(value.to_string());
        }
        arena
    }

    fn item_strings(arena: &NodeArena<char, String>) -> Vec<(String, String)> {
        Items::new(arena)
            .map(|(p, v)| (p.into_iter().collect(), v.clone()))
            .collect()
    }

    fn prefix_strings(arena: &NodeArena<char, String>) -> Vec<String> {
        Prefixes::new(arena)
            .map(|(p, _)| p.into_iter().collect())
            .collect()
    }

    #[test]
    fn test_items_empty_automaton() {
        let arena = build(&[]);
        assert!(item_strings(&arena).is_empty());
    }

    #[test]
    fn test_items_lexicographic_order() {
        let arena = build(&[
            ("janek", "nice"),
            ("jaan", "nice"),
            ("jaagup", "ugly"),
            ("jaanus", "nice"),
            ("janis", "nice"),
        ]);
        let items = item_strings(&arena);
        let names: Vec<&str> = items.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(names, vec!["jaagup", "jaan", "jaanus", "janek", "janis"]);
        assert_eq!(items[0].1, "ugly");
    }

    #[test]
    fn test_items_skips_intermediate_nodes() {
        let arena = build(&[("abc", "x")]);
        let items = item_strings(&arena);
        assert_eq!(items, vec![("abc".to_string(), "x".to_string())]);
    }

    #[test]
    fn test_prefixes_enumerates_every_node() {
        let arena = build(&[("jaanus", "v"), ("janek", "v"), ("janis", "v")]);
        assert_eq!(
            prefix_strings(&arena),
            vec![
                "", "j", "ja", "jaa", "jaan", "jaanu", "jaanus", "jan", "jane", "janek", "jani",
                "janis"
            ]
        );
    }

    #[test]
    fn test_prefixes_values_absent_on_intermediates() {
        let arena = build(&[("ab", "x")]);
        let all: Vec<(String, Option<String>)> = Prefixes::new(&arena)
            .map(|(p, v)| (p.into_iter().collect(), v.cloned()))
            .collect();
        assert_eq!(
            all,
            vec![
                ("".to_string(), None),
                ("a".to_string(), None),
                ("ab".to_string(), Some("x".to_string())),
            ]
        );
    }

    #[test]
    fn test_traversal_is_restartable() {
        let arena = build(&[("ab", "x"), ("cd", "y")]);
        assert_eq!(item_strings(&arena), item_strings(&arena));
    }
}
