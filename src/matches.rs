//! Match spans and overlap resolution.

use std::cmp::Ordering;

use crate::token::Token;

/// A single dictionary occurrence found in a scanned input.
///
/// `start`/`end` are half-open token offsets into the input, so
/// `elems == input[start..end]`. `label` is the value attached when the
/// pattern was inserted (`()` when the map semantics are unused).
///
/// Matches compare by `(start, end)` only; the carried tokens and label do
/// not participate in equality or ordering.
#[derive(Clone, Debug)]
pub struct Match<T: Token, V> {
    pub start: usize,
    pub end: usize,
    pub elems: Vec<T>,
    pub label: V,
}

impl<T: Token, V> Match<T, V> {
    pub fn new(start: usize, end: usize, elems: Vec<T>, label: V) -> Self {
        Match {
            start,
            end,
            elems,
            label,
        }
    }

    /// Number of tokens covered by this match.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if this span ends at or before the other begins (no overlap).
    pub fn is_before(&self, other: &Self) -> bool {
        self.end <= other.start
    }
}

impl<T: Token, V> PartialEq for Match<T, V> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<T: Token, V> Eq for Match<T, V> {}

impl<T: Token, V> PartialOrd for Match<T, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Token, V> Ord for Match<T, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.start, self.end).cmp(&(other.start, other.end))
    }
}

/// Select a non-overlapping subset of matches.
///
/// Candidates are sorted by `start` ascending, ties broken by `end`
/// descending (longest first), then swept left to right: a candidate
/// survives iff it begins at or after the end of the last survivor.
/// Touching spans (`a.end == b.start`) are both kept.
///
/// This is a deterministic greedy selection in which the earliest start
/// always wins its cluster; it does not maximize total coverage. The output
/// keeps the start-ascending order of the survivors, and the operation is
/// idempotent.
pub fn remove_overlaps<T: Token, V>(mut matches: Vec<Match<T, V>>) -> Vec<Match<T, V>> {
    matches.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut kept = Vec::with_capacity(matches.len());
    let mut last_end = 0usize;
    for m in matches {
        if m.start >= last_end {
            last_end = m.end;
            kept.push(m);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(pairs: &[(usize, usize)]) -> Vec<Match<char, ()>> {
        pairs
            .iter()
            .map(|&(start, end)| Match::new(start, end, Vec::new(), ()))
            .collect()
    }

    fn as_pairs(matches: &[Match<char, ()>]) -> Vec<(usize, usize)> {
        matches.iter().map(|m| (m.start, m.end)).collect()
    }

    #[test]
    fn test_equality_is_by_span_only() {
        let a = Match::new(1, 3, vec!['a', 'b'], "x");
        let b = Match::new(1, 3, vec!['c', 'd'], "y");
        assert_eq!(a, b);
    }

    #[test]
    fn test_ordering_is_lexicographic_on_span() {
        let mut v = spans(&[(2, 4), (1, 5), (1, 3)]);
        v.sort();
        assert_eq!(as_pairs(&v), vec![(1, 3), (1, 5), (2, 4)]);
    }

    #[test]
    fn test_empty_input() {
        let out = remove_overlaps(spans(&[]));
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_match_kept() {
        let out = remove_overlaps(spans(&[(3, 7)]));
        assert_eq!(as_pairs(&out), vec![(3, 7)]);
    }

    #[test]
    fn test_simple_overlap_cluster() {
        let out = remove_overlaps(spans(&[(1, 3), (2, 5), (4, 5)]));
        assert_eq!(as_pairs(&out), vec![(1, 3), (4, 5)]);
    }

    #[test]
    fn test_dense_cluster_resolves_to_earliest_longest() {
        let out = remove_overlaps(spans(&[
            (1, 2),
            (2, 3),
            (4, 5),
            (4, 8),
            (5, 6),
            (6, 9),
            (7, 9),
            (2, 7),
            (1, 10),
        ]));
        assert_eq!(as_pairs(&out), vec![(1, 10)]);
    }

    #[test]
    fn test_touching_spans_both_kept() {
        let out = remove_overlaps(spans(&[(0, 3), (3, 6), (6, 8)]));
        assert_eq!(as_pairs(&out), vec![(0, 3), (3, 6), (6, 8)]);
    }

    #[test]
    fn test_longest_wins_among_equal_starts() {
        let out = remove_overlaps(spans(&[(2, 4), (2, 9), (2, 6)]));
        assert_eq!(as_pairs(&out), vec![(2, 9)]);
    }

    #[test]
    fn test_earliest_start_beats_longer_later_span() {
        // (1,4) starts first and wins even though (2,6) covers more tokens.
        let out = remove_overlaps(spans(&[(1, 4), (2, 4), (2, 6)]));
        assert_eq!(as_pairs(&out), vec![(1, 4)]);
    }

    #[test]
    fn test_idempotence() {
        let input = spans(&[(1, 2), (2, 3), (4, 5), (4, 8), (5, 6), (6, 9), (2, 7)]);
        let once = remove_overlaps(input);
        let twice = remove_overlaps(once.clone());
        assert_eq!(as_pairs(&once), as_pairs(&twice));
    }

    #[test]
    fn test_output_is_start_ordered() {
        let out = remove_overlaps(spans(&[(8, 9), (0, 2), (4, 6), (2, 4)]));
        assert_eq!(as_pairs(&out), vec![(0, 2), (2, 4), (4, 6), (8, 9)]);
    }
}
